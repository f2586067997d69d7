pub mod stubs;

pub use stubs::{ScriptedSource, SourceSpy};
