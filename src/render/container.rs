use std::sync::{Mutex, MutexGuard, PoisonError};

use log::trace;

use super::View;

/// Mount point of a widget.
pub trait Container: Send + Sync {
    /// Identifier the container was configured with.
    fn selector(&self) -> &str;

    /// Replace whatever the container currently displays.
    fn mount(&self, view: View);
}

/// Container keeping the last mounted view in memory.
#[derive(Debug)]
pub struct MemoryContainer {
    selector: String,
    state: Mutex<Mounted>,
}

#[derive(Debug, Default)]
struct Mounted {
    view: Option<View>,
    mounts: usize,
}

impl MemoryContainer {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            state: Mutex::new(Mounted::default()),
        }
    }

    /// Last mounted view, if any.
    pub fn view(&self) -> Option<View> {
        self.lock().view.clone()
    }

    /// Number of views mounted so far.
    pub fn mounts(&self) -> usize {
        self.lock().mounts
    }

    fn lock(&self) -> MutexGuard<'_, Mounted> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Container for MemoryContainer {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn mount(&self, view: View) {
        trace!("mounting view into '{}'", self.selector);
        let mut mounted = self.lock();
        mounted.view = Some(view);
        mounted.mounts += 1;
    }
}
