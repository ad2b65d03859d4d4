// ── Domain model ──
//
// Types consumers work with. Wire types stay in `nexecur_api::models`;
// `convert` bridges the two.

pub mod alarm;
pub mod event;
pub mod user;

pub use alarm::{AlarmCommand, AlarmStatus};
pub use event::Event;
pub use user::UserConfiguration;
