//! Page routing of the main window.
//!
//! # Module Structure
//!
//! - `page_kind`: The closed set of pages
//! - `request`: Requests pages post to the router
//! - `router`: Active page, page cache and the help return slot

mod page_kind;
mod request;
mod router;

pub use page_kind::PageKind;
pub use request::{NavigationRequest, Navigator};
pub use router::{ActivePage, HeaderInfo, MainCommands, NavigationRouter};
