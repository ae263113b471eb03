//! Page kinds.

use strum::{Display, EnumIter, IntoStaticStr};

/// Every page the main window can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum PageKind {
    Welcome,
    Settings,
    CompanyOverview,
    CompanyDetail,
    CompanyEditor,
    Help,
}

impl PageKind {
    /// Key used to pick help content for a page.
    pub fn help_context(self) -> &'static str {
        self.into()
    }
}
