use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Single scope level mapping symbols to values
///
/// Cloning a `Frame` clones the handle: every environment and closure holding
/// it observes the same bindings.
#[derive(Clone, Default)]
pub struct Frame {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
}

impl Frame {
    /// Creates an empty frame
    pub fn new() -> Self {
        Frame::default()
    }

    /// Creates a frame from prepared bindings
    pub fn from_bindings(bindings: HashMap<String, Value>) -> Self {
        Frame {
            bindings: Rc::new(RefCell::new(bindings)),
        }
    }

    /// Pairs `params` with `args` into a fresh frame
    ///
    /// Unequal lengths are an `ArityMismatch`; nothing is padded.
    pub fn zip(params: &[String], args: Vec<Value>) -> Result<Self> {
        if params.len() != args.len() {
            return Err(Error::ArityMismatch {
                expected: params.len().to_string(),
                got: args.len(),
            });
        }
        Ok(Frame::from_bindings(
            params.iter().cloned().zip(args).collect(),
        ))
    }

    /// Gets the value bound to `name` in this frame only
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Binds or overwrites `name` in this frame
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Checks whether this frame binds `name`
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Checks whether two handles refer to the same frame
    pub fn ptr_eq(&self, other: &Frame) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.names()).finish()
    }
}

/// Ordered chain of frames, searched most-recent first
///
/// Cloning an `Environment` clones the handle, so an in-place extension
/// through one clone is seen by all of them. `extend_env` instead returns a
/// new chain that shares the existing frames.
#[derive(Clone, Default)]
pub struct Environment {
    frames: Rc<RefCell<VecDeque<Frame>>>,
}

impl Environment {
    /// Creates an environment with no frames
    pub fn new() -> Self {
        Environment::default()
    }

    /// Creates an environment from frames in lookup-priority order
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Environment {
            frames: Rc::new(RefCell::new(frames.into())),
        }
    }

    /// Looks up the value of `name` in the first frame that binds it
    pub fn lookup_var(&self, name: &str) -> Result<Value> {
        match self.frames.borrow().iter().find_map(|frame| frame.get(name)) {
            Some(Value::Unassigned) => Err(Error::UnassignedVariable {
                name: name.to_string(),
            }),
            Some(value) => Ok(value),
            None => Err(Error::unbound(name)),
        }
    }

    /// Returns the first frame that binds `name`
    pub fn lookup_var_ref(&self, name: &str) -> Option<Frame> {
        self.frames
            .borrow()
            .iter()
            .find(|frame| frame.contains(name))
            .cloned()
    }

    /// Returns a new environment with a frame binding `params` to `args` in front
    ///
    /// `self` is left untouched.
    pub fn extend_env(&self, params: &[String], args: Vec<Value>) -> Result<Environment> {
        let frame = Frame::zip(params, args)?;
        let mut frames = self.frames.borrow().clone();
        frames.push_front(frame);
        Ok(Environment {
            frames: Rc::new(RefCell::new(frames)),
        })
    }

    /// Prepends a frame binding `params` to `args` to this environment itself
    pub fn extend_env_in_place(&self, params: &[String], args: Vec<Value>) -> Result<()> {
        let frame = Frame::zip(params, args)?;
        self.frames.borrow_mut().push_front(frame);
        Ok(())
    }

    /// Overwrites `params` in the head frame with `args`
    pub fn patch_head_frame(&self, params: &[String], args: Vec<Value>) -> Result<()> {
        if params.len() != args.len() {
            return Err(Error::ArityMismatch {
                expected: params.len().to_string(),
                got: args.len(),
            });
        }
        let head = self
            .head()
            .ok_or_else(|| Error::malformed("cannot patch an environment with no frames"))?;
        for (param, arg) in params.iter().zip(args) {
            head.set(param.as_str(), arg);
        }
        Ok(())
    }

    /// Returns the most recently introduced frame
    pub fn head(&self) -> Option<Frame> {
        self.frames.borrow().front().cloned()
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Checks if `name` is bound in any frame
    pub fn exists(&self, name: &str) -> bool {
        self.lookup_var_ref(name).is_some()
    }

    /// Checks whether two handles refer to the same frame chain
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
