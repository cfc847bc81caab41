mod alert;
mod button;
mod callout;
mod card;
mod form;
mod layout;
mod link;
mod modal;
mod tab_bar;
mod table;
mod token;
mod topbar;
mod util;

pub use self::alert::*;
pub use self::button::*;
pub use self::callout::*;
pub use self::card::*;
pub use self::form::*;
pub use self::layout::*;
pub use self::link::*;
pub use self::modal::*;
pub use self::tab_bar::*;
pub use self::table::*;
pub use self::token::*;
pub use self::topbar::*;
pub use self::util::*;
