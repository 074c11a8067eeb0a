//! Tokio runtime and Wiremock server held across behavioural steps.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use rstest_bdd::Slot;
use todey::TodeyError;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

fn harness_error(message: &str) -> TodeyError {
    TodeyError::Io {
        message: message.to_owned(),
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns [`TodeyError::Io`] if the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, TodeyError> {
    if runtime.with_ref(|_| ()).is_none() {
        let created = Runtime::new().map_err(|error| TodeyError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        runtime.set(SharedRuntime::new(created));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| harness_error("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Mounts every mock on the shared server.
///
/// # Errors
///
/// Returns [`TodeyError::Io`] if the runtime or server has not been created.
pub fn mount_all(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    mocks: Vec<Mock>,
) -> Result<(), TodeyError> {
    let shared_runtime = ensure_runtime_and_server(runtime, server)?;
    server
        .with_ref(|mock_server| {
            for mock in mocks {
                shared_runtime.block_on(mock.mount(mock_server));
            }
        })
        .ok_or_else(|| harness_error("mock server not initialised"))
}
