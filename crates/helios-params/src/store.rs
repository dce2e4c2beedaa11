//! The parameter registry and its reaction plumbing.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::value::{Color, ParamKind, ParamSpec, ParamValue};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a write was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidReason {
    /// No knob with that name is registered.
    UnknownName,
    /// The value's kind differs from the declared kind.
    KindMismatch { expected: ParamKind, found: ParamKind },
    /// A float outside the inclusive declared range.
    OutOfRange { value: f32, min: f32, max: f32 },
    /// NaN or infinity.
    NotFinite,
    /// Text that does not parse as the declared kind.
    Unparseable(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::UnknownName => f.write_str("unknown parameter"),
            InvalidReason::KindMismatch { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            InvalidReason::OutOfRange { value, min, max } => {
                write!(f, "{value} is outside [{min}, {max}]")
            }
            InvalidReason::NotFinite => f.write_str("value is not finite"),
            InvalidReason::Unparseable(text) => write!(f, "cannot parse {text:?}"),
        }
    }
}

/// A rejected parameter write. The previously committed value is retained.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("invalid parameter {name}: {reason}")]
pub struct InvalidParameter {
    pub name: String,
    pub reason: InvalidReason,
}

impl InvalidParameter {
    pub fn new(name: &str, reason: InvalidReason) -> Self {
        Self {
            name: name.to_string(),
            reason,
        }
    }
}

// ---------------------------------------------------------------------------
// ParameterStore
// ---------------------------------------------------------------------------

/// A change reaction. Receives the context passed to [`ParameterStore::set`]
/// and the newly committed value.
pub type Reaction<C> = Box<dyn FnMut(&mut C, ParamValue)>;

struct Entry<C> {
    spec: ParamSpec,
    value: ParamValue,
    reactions: Vec<Reaction<C>>,
}

/// Mutable registry of named, typed knobs.
///
/// `C` is the context reactions act upon (typically the live scene and the
/// camera). The store never holds on to it between calls.
pub struct ParameterStore<C> {
    entries: Vec<Entry<C>>,
    index: HashMap<&'static str, usize>,
}

impl<C> Default for ParameterStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ParameterStore<C> {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Store pre-populated with the given declarations at their defaults.
    pub fn with_specs(specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        let mut store = Self::new();
        for spec in specs {
            store.declare(spec);
        }
        store
    }

    /// Register a knob at its default value. Re-declaring a name replaces the
    /// declaration and drops its reactions.
    pub fn declare(&mut self, spec: ParamSpec) {
        let entry = Entry {
            value: spec.default,
            spec,
            reactions: Vec::new(),
        };
        match self.index.get(entry.spec.name) {
            Some(&idx) => self.entries[idx] = entry,
            None => {
                self.index.insert(entry.spec.name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Register a reaction to run after every committed write of `name`.
    pub fn observe(
        &mut self,
        name: &str,
        reaction: impl FnMut(&mut C, ParamValue) + 'static,
    ) -> Result<(), InvalidParameter> {
        let idx = self.lookup(name)?;
        self.entries[idx].reactions.push(Box::new(reaction));
        Ok(())
    }

    /// Validate and commit `value`, then run the knob's reactions in
    /// registration order before returning.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
        ctx: &mut C,
    ) -> Result<(), InvalidParameter> {
        let value = value.into();
        let idx = self.lookup(name)?;
        let entry = &mut self.entries[idx];
        validate(&entry.spec, &value).map_err(|reason| InvalidParameter::new(name, reason))?;

        debug!(param = name, %value, "parameter committed");
        entry.value = value;
        for reaction in &mut entry.reactions {
            reaction(ctx, value);
        }
        Ok(())
    }

    /// Parse `text` according to the knob's kind, then [`set`](Self::set) it.
    pub fn set_from_str(
        &mut self,
        name: &str,
        text: &str,
        ctx: &mut C,
    ) -> Result<(), InvalidParameter> {
        let idx = self.lookup(name)?;
        let kind = self.entries[idx].spec.kind;
        let value = ParamValue::parse(kind, text)
            .ok_or_else(|| InvalidParameter::new(name, InvalidReason::Unparseable(text.into())))?;
        self.set(name, value, ctx)
    }

    /// Validate and commit without running reactions. Used to seed the store
    /// from configuration before anything observes it.
    pub fn preset(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<(), InvalidParameter> {
        let value = value.into();
        let idx = self.lookup(name)?;
        let entry = &mut self.entries[idx];
        validate(&entry.spec, &value).map_err(|reason| InvalidParameter::new(name, reason))?;
        entry.value = value;
        Ok(())
    }

    /// The committed value, if the knob exists.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.index.get(name).map(|&idx| self.entries[idx].value)
    }

    /// Committed bool, `false` when missing or of another kind.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Committed float, `0.0` when missing or of another kind.
    pub fn float(&self, name: &str) -> f32 {
        self.get(name).and_then(|v| v.as_float()).unwrap_or(0.0)
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(|v| v.as_color())
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.index.get(name).map(|&idx| &self.entries[idx].spec)
    }

    /// Declarations in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &ParamSpec> {
        self.entries.iter().map(|e| &e.spec)
    }

    pub fn reaction_count(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map(|&idx| self.entries[idx].reactions.len())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<usize, InvalidParameter> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| InvalidParameter::new(name, InvalidReason::UnknownName))
    }
}

fn validate(spec: &ParamSpec, value: &ParamValue) -> Result<(), InvalidReason> {
    if value.kind() != spec.kind {
        return Err(InvalidReason::KindMismatch {
            expected: spec.kind,
            found: value.kind(),
        });
    }
    if let ParamValue::Float(v) = *value {
        if !v.is_finite() {
            return Err(InvalidReason::NotFinite);
        }
        if let Some((min, max)) = spec.range
            && (v < min || v > max)
        {
            return Err(InvalidReason::OutOfRange { value: v, min, max });
        }
    }
    Ok(())
}
