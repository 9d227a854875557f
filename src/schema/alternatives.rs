//! The alternatives combinator.
//!
//! An [`AlternativesSchema`] validates a value against an ordered list of
//! candidate schemas under one of three [`Mode`]s:
//! - `Any`: the first matching candidate wins (default)
//! - `One`: exactly one candidate must match
//! - `All`: every candidate must match, each validating the previous output
//!
//! # Example
//!
//! ```rust
//! use schemata::{Context, Schema};
//! use serde_json::json;
//!
//! // A string that is then converted to a number
//! let schema = schemata::alternatives![Schema::string(), Schema::number().convert()]
//!     .match_("all")
//!     .unwrap();
//!
//! let result = schema.validate(&json!("2"), &Context::default());
//! assert_eq!(result.into_result().unwrap(), json!(2));
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConfigError, Local, ValidationError, ValidationErrors};
use crate::messages::codes;
use crate::schema::definition::{compile, Definition};
use crate::schema::node::SchemaNode;
use crate::schema::traits::SchemaLike;
use crate::validation::{Context, Settings};
use crate::ValidationResult;

const TARGET: &str = "schemata::alternatives";

/// How many candidates must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// At least one candidate must match; evaluation stops at the first match.
    #[default]
    Any,
    /// Exactly one candidate must match; every candidate is evaluated.
    One,
    /// Every candidate must match; evaluation stops at the first failure.
    All,
}

impl Mode {
    /// Returns the mode's name as accepted by [`AlternativesSchema::match_`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Any => "any",
            Mode::One => "one",
            Mode::All => "all",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Mode::Any),
            "one" => Ok(Mode::One),
            "all" => Ok(Mode::All),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded failure of one candidate in `Any` mode.
struct Attempt {
    index: usize,
    errors: ValidationErrors,
}

/// A schema validating a value against ordered candidate schemas.
///
/// Candidates keep the order in which they were added; that order decides
/// which candidate wins in `Any` mode, the order of reported attempts, and
/// the chaining order in `All` mode.
///
/// Builder methods consume the schema and return the configured one.
/// Candidates are reference counted, so cloning a schema to configure two
/// variants of it shares every candidate subtree.
///
/// # Error reporting
///
/// | mode | outcome | error |
/// |------|---------|-------|
/// | any | no candidates | `alternatives.any` |
/// | any | one candidate, failed | that candidate's errors, unchanged |
/// | any | several candidates, all failed | `alternatives.any` with `attempts` |
/// | one | none matched | `alternatives.any` |
/// | one | several matched | `alternatives.one` |
/// | all | no candidates | `alternatives.any` |
/// | all | a candidate failed | `alternatives.all` |
#[derive(Debug, Clone, Default)]
pub struct AlternativesSchema {
    mode: Mode,
    candidates: Vec<SchemaNode>,
    settings: Settings,
}

impl AlternativesSchema {
    /// Creates a match-any schema with no candidates.
    ///
    /// With no candidates every value fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_candidates(candidates: Vec<SchemaNode>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    /// Appends candidates, compiling each one.
    ///
    /// Existing candidates keep their positions; new ones follow in the
    /// order given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Context, Schema};
    /// use serde_json::json;
    ///
    /// let schema = schemata::alternatives![Schema::number()].try_(vec![Schema::string()]);
    ///
    /// assert!(schema.validate(&json!("x"), &Context::default()).is_success());
    /// assert!(schema.validate(&json!(1), &Context::default()).is_success());
    /// assert!(schema.validate(&json!(true), &Context::default()).is_failure());
    /// ```
    pub fn try_<I>(mut self, schemas: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Definition>,
    {
        self.candidates.extend(schemas.into_iter().map(compile));
        self
    }

    /// Sets the match mode by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMode` unless `mode` is `all`, `one` or
    /// `any`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::Schema;
    ///
    /// assert!(Schema::alternatives(Vec::<schemata::Definition>::new()).match_("one").is_ok());
    ///
    /// let err = Schema::alternatives(Vec::<schemata::Definition>::new()).match_("x").unwrap_err();
    /// assert!(err.to_string().contains("Mode must be all, one or any"));
    /// ```
    pub fn match_(self, mode: &str) -> Result<Self, ConfigError> {
        Ok(self.mode(mode.parse()?))
    }

    /// Sets the match mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Layers settings onto this schema.
    ///
    /// The overrides apply to this schema and every candidate validated
    /// through it, unless a candidate overrides them again.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = self.settings.merge(settings);
        self
    }

    /// Sets an explicit label for this schema and its candidates.
    pub fn label(self, label: impl Into<String>) -> Self {
        self.settings(Settings::new().label(label))
    }

    /// Sets the abort-early flag for this schema and its candidates.
    pub fn abort_early(self, abort_early: bool) -> Self {
        self.settings(Settings::new().abort_early(abort_early))
    }

    /// Returns the configured match mode.
    pub fn matching(&self) -> Mode {
        self.mode
    }

    /// Returns the candidates in order.
    pub fn candidates(&self) -> &[SchemaNode] {
        &self.candidates
    }

    /// Validates a value against the candidates under the configured mode.
    pub fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        let context = context.derive(&self.settings);
        match self.mode {
            Mode::Any => self.validate_any(value, &context),
            Mode::One => self.validate_one(value, &context),
            Mode::All => self.validate_all(value, &context),
        }
    }

    /// Returns the first match; otherwise reports every candidate's errors.
    fn validate_any(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        let mut attempts = Vec::with_capacity(self.candidates.len());

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.validate(value, context) {
                Validation::Success(output) => {
                    tracing::trace!(target: TARGET, mode = "any", index, "candidate matched");
                    return Validation::Success(output);
                }
                Validation::Failure(errors) => {
                    tracing::trace!(
                        target: TARGET,
                        mode = "any",
                        index,
                        errors = errors.len(),
                        "candidate failed"
                    );
                    attempts.push(Attempt { index, errors });
                }
            }
        }

        let failed: Vec<usize> = attempts.iter().map(|attempt| attempt.index).collect();
        tracing::debug!(
            target: TARGET,
            mode = "any",
            candidates = self.candidates.len(),
            failed = ?failed,
            "no candidate matched"
        );

        // A lone candidate reports its own errors.
        if self.candidates.len() == 1 {
            if let Some(attempt) = attempts.pop() {
                return Validation::Failure(attempt.errors);
            }
        }

        if attempts.is_empty() {
            return fail(codes::ALTERNATIVES_ANY, context, None);
        }

        let flattened = attempts
            .into_iter()
            .flat_map(|attempt| attempt.errors.into_iter())
            .collect();
        fail(codes::ALTERNATIVES_ANY, context, Some(flattened))
    }

    /// Evaluates every candidate and requires exactly one match.
    fn validate_one(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        let mut matched = None;
        let mut matches = 0usize;

        for (index, candidate) in self.candidates.iter().enumerate() {
            let result = candidate.validate(value, context);
            tracing::trace!(
                target: TARGET,
                mode = "one",
                index,
                matched = result.is_success(),
                "candidate evaluated"
            );
            if let Validation::Success(output) = result {
                matches += 1;
                if matched.is_none() {
                    matched = Some(output);
                }
            }
        }

        tracing::debug!(
            target: TARGET,
            mode = "one",
            candidates = self.candidates.len(),
            matches,
            "candidates evaluated"
        );

        match (matches, matched) {
            (1, Some(output)) => Validation::Success(output),
            (0, _) | (_, None) => fail(codes::ALTERNATIVES_ANY, context, None),
            _ => fail(codes::ALTERNATIVES_ONE, context, None),
        }
    }

    /// Threads the value through every candidate, stopping at the first failure.
    fn validate_all(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        if self.candidates.is_empty() {
            return fail(codes::ALTERNATIVES_ANY, context, None);
        }

        let mut current = value.clone();

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.validate(&current, context) {
                Validation::Success(output) => current = output,
                Validation::Failure(errors) => {
                    tracing::debug!(
                        target: TARGET,
                        mode = "all",
                        index,
                        errors = errors.len(),
                        "candidate failed"
                    );
                    return fail(codes::ALTERNATIVES_ALL, context, None);
                }
            }
        }

        Validation::Success(current)
    }
}

impl SchemaLike for AlternativesSchema {
    type Output = Value;

    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context)
    }

    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context)
    }
}

/// Builds the single summary error of a failed combinator.
fn fail(
    code: &str,
    context: &Context,
    attempts: Option<Vec<ValidationError>>,
) -> ValidationResult<Value> {
    let mut local = Local::from_context(context);
    if let Some(attempts) = attempts {
        local = local.with_attempts(attempts);
    }
    Validation::Failure(ValidationErrors::single(ValidationError::new(code, local)))
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<AlternativesSchema>();
    assert_sync::<AlternativesSchema>();
};
