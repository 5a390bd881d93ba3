//! Response selection.
//!
//! A [`ResponseSelector`] turns a classified intent into reply text, either by
//! picking one of the canned replies in a [`ResponseTable`] through a
//! [`Chooser`], or by delegating the original utterance to a
//! [`ResponseGenerator`]. Generator failures never escape the selector; they
//! are logged and replaced by a fixed apology.

pub mod chooser;
pub mod generator;
pub mod selector;
pub mod table;

pub use chooser::{Chooser, RandomChooser};
pub use generator::{CommandGenerator, FnGenerator, ResponseGenerator, TimeoutGenerator};
pub use selector::ResponseSelector;
pub use table::{ResponseLists, ResponseTable};
