use serde::{Deserialize, Serialize};

/// Screens the application can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    Register,
    Home,
    Treatments,
    Doctor,
    Nutritionist,
}

impl Screen {
    /// Route path as used by the front-end router.
    pub fn route(&self) -> &'static str {
        match self {
            Screen::Login => "/",
            Screen::Register => "/register",
            Screen::Home => "/home",
            Screen::Treatments => "/menu/traitement",
            Screen::Doctor => "/menu/medecin",
            Screen::Nutritionist => "/menu/nutritionniste",
        }
    }
}

/// Navigation collaborator. Screen stacking is the implementation's business.
pub trait NavigationPort: Send + Sync {
    fn navigate_to(&self, screen: Screen);
}
