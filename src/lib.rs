//! Family Router
//!
//! Decides which screen a user of a family app should see, given a snapshot
//! of authentication and family-membership state. The core is two pure
//! functions, [`derive_persona`] and [`resolve_route`]; everything else in
//! the crate (configuration, snapshot decoding, the navigation host) sits
//! around them.
//!
//! ```
//! use family_router::{resolve_route, AuthState, Profile, RoutePath};
//!
//! let state = AuthState::signed_in(Profile::kid("k1").with_passcode("1234"));
//! let decision = resolve_route(&state).unwrap();
//! assert_eq!(decision.path, RoutePath::PendingApproval);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod persona;
pub mod routing;
pub mod types;
pub mod version;

pub use error::{Error, Result};
pub use persona::{derive_persona, Persona};
pub use routing::{resolve_route, RouteDecision, RoutePath};
pub use types::{AuthState, Family, Profile, Role};
