mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_atom_types, print_interactions, print_model_summary, print_warnings};

/// Presentation settings for one run.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Banner and spinners are drawn; tables and warnings are printed either way.
    pub interactive: bool,
}

impl Context {
    /// Interactive output needs a terminal on stderr and no `--quiet`.
    pub fn for_run(quiet: bool) -> Self {
        Self {
            interactive: !quiet && crate::io::stderr_is_tty(),
        }
    }

    pub fn progress(self) -> Progress {
        Progress::new(self.interactive)
    }
}
