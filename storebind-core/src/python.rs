//! Python Bindings
//!
//! Exposes the adapter to Python hosts. Any Python object with `subscribe`,
//! `unsubscribe` and `get` methods is accepted as a store; the methods are
//! looked up when they are called, not when the store is passed in.
//!
//! Exceptions raised by a Python store reach the caller unchanged.
//!
//! # Testing
//!
//! The `extension-module` build leaves libpython unlinked, so none of this
//! module runs under `cargo test`. The adapter logic it forwards to is
//! covered by the `subscribe` tests; these bindings are exercised only from
//! a Python interpreter that imports `_core`.

use std::sync::Arc;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing::warn;

use crate::host::{Invalidate, NodeId};
use crate::store::{Listener, Store, StoreRef};
use crate::subscribe::{Subscribe, SubscribeError, SubscribeProps};

// ----------------------------------------------------------------------------
// Collaborators
// ----------------------------------------------------------------------------

/// A duck-typed Python store.
struct PyStore {
    obj: PyObject,
}

impl PyStore {
    fn call_with_listener(&self, method: &str, listener: &Listener) -> PyResult<()> {
        Python::with_gil(|py| {
            let listener = Py::new(
                py,
                PyListener {
                    inner: listener.clone(),
                },
            )?;
            self.obj.call_method1(py, method, (listener,))?;
            Ok(())
        })
    }
}

impl Store for PyStore {
    type Value = PyObject;
    type Error = PyErr;

    fn subscribe(&self, listener: &Listener) -> PyResult<()> {
        self.call_with_listener("subscribe", listener)
    }

    fn unsubscribe(&self, listener: &Listener) -> PyResult<()> {
        self.call_with_listener("unsubscribe", listener)
    }

    fn get(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| self.obj.call_method0(py, "get"))
    }
}

/// Forwards re-render requests to a Python callable taking the node ID.
struct PyInvalidate {
    callback: PyObject,
}

impl Invalidate for PyInvalidate {
    fn request_render(&self, node: NodeId) {
        Python::with_gil(|py| {
            if let Err(err) = self.callback.call1(py, (node.raw(),)) {
                warn!(%node, "re-render callback raised");
                err.print(py);
            }
        });
    }
}

fn store_refs(py: Python<'_>, stores: &[PyObject]) -> Vec<StoreRef<PyObject, PyErr>> {
    stores
        .iter()
        .map(|obj| {
            StoreRef::new(PyStore {
                obj: obj.clone_ref(py),
            })
        })
        .collect()
}

fn into_py_err(err: SubscribeError<PyErr>) -> PyErr {
    match err {
        SubscribeError::Store(err) => err,
        err @ SubscribeError::MissingSlot => PyValueError::new_err(err.to_string()),
        err @ SubscribeError::Disposed => PyRuntimeError::new_err(err.to_string()),
    }
}

// ----------------------------------------------------------------------------
// Python Classes
// ----------------------------------------------------------------------------

/// Python-exposed listener handed to stores.
///
/// Calling it signals a change. Listeners compare and hash by ID, so a store
/// can keep them in a set or list and still find them on `unsubscribe`.
#[pyclass(name = "Listener", frozen)]
pub struct PyListener {
    inner: Listener,
}

#[pymethods]
impl PyListener {
    fn __call__(&self) {
        self.inner.notify();
    }

    /// The listener's unique ID.
    #[getter]
    fn id(&self) -> u64 {
        self.inner.id().raw()
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }

    fn __hash__(&self) -> u64 {
        self.inner.id().raw()
    }

    fn __repr__(&self) -> String {
        format!("Listener(id={})", self.inner.id().raw())
    }
}

/// Python-exposed adapter node.
///
/// ```python
/// node = Subscribe(on_update=host.invalidate, to=[counter])
/// tree = node.render(lambda props: f"count: {props['state'][0]}")
/// node.rendered()
/// node.dispose()
/// ```
#[pyclass(name = "Subscribe")]
pub struct PySubscribe {
    inner: Subscribe<PyObject, PyErr>,

    /// The store objects as passed in, in request order.
    stores: Vec<PyObject>,
}

#[pymethods]
impl PySubscribe {
    /// Create a node that calls `on_update(node_id)` when a store changes.
    #[new]
    #[pyo3(signature = (on_update, to = None))]
    fn new(py: Python<'_>, on_update: PyObject, to: Option<Vec<PyObject>>) -> Self {
        let stores = to.unwrap_or_default();
        let props = SubscribeProps::from(store_refs(py, &stores));
        let host = Arc::new(PyInvalidate {
            callback: on_update,
        });

        Self {
            inner: Subscribe::new(props, host),
            stores,
        }
    }

    /// The node's unique ID, as passed to `on_update`.
    #[getter]
    fn id(&self) -> u64 {
        self.inner.id().raw()
    }

    /// The listener this node registers on stores.
    #[getter]
    fn listener(&self, py: Python<'_>) -> PyResult<Py<PyListener>> {
        Py::new(
            py,
            PyListener {
                inner: self.inner.listener().clone(),
            },
        )
    }

    /// The requested stores.
    #[getter]
    fn to(&self, py: Python<'_>) -> Vec<PyObject> {
        self.stores.iter().map(|obj| obj.clone_ref(py)).collect()
    }

    /// Replace the requested stores.
    #[setter]
    fn set_to(&mut self, py: Python<'_>, stores: Vec<PyObject>) {
        self.inner.set_stores(store_refs(py, &stores));
        self.stores = stores;
    }

    /// Whether the node has been disposed.
    #[getter]
    fn disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Subscribe to every requested store and return their values.
    fn evaluate(&self) -> PyResult<Vec<PyObject>> {
        self.inner.evaluate().map_err(into_py_err)
    }

    /// Evaluate, then call `slot({"state": values})` and return its result.
    #[pyo3(signature = (slot = None))]
    fn render(&self, py: Python<'_>, slot: Option<PyObject>) -> PyResult<PyObject> {
        let state = self.inner.evaluate().map_err(into_py_err)?;
        let slot = slot.ok_or_else(|| into_py_err(SubscribeError::MissingSlot))?;

        let props = PyDict::new_bound(py);
        props.set_item("state", state)?;
        slot.call1(py, (props,))
    }

    /// Post-render cleanup.
    fn rendered(&self) -> PyResult<()> {
        self.inner.rendered().map_err(into_py_err)
    }

    /// Permanently retire the node.
    fn dispose(&self) -> PyResult<()> {
        self.inner.dispose().map_err(into_py_err)
    }

    /// Number of stores currently holding this node's listener.
    fn subscription_count(&self) -> usize {
        self.inner.subscription_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "Subscribe(id={}, subscriptions={}, disposed={})",
            self.inner.id().raw(),
            self.inner.subscription_count(),
            self.inner.is_disposed()
        )
    }
}
