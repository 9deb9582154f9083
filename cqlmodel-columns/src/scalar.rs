//! Scalar column declarations.

use cqlmodel_types::Value;

use crate::{Column, ColumnError, ColumnOptions, ColumnResult};

/// Applies `coerce` to a present value, reporting failures as conversion errors.
fn convert_with(
    column: &dyn Column,
    raw: Option<Value>,
    coerce: impl FnOnce(Value) -> Result<Value, String>,
) -> ColumnResult<Option<Value>> {
    raw.map(|v| coerce(v).map_err(|m| ColumnError::conversion(column.label(), m)))
        .transpose()
}

/// Required check followed by `coerce`, reporting failures as validation errors.
fn validate_with(
    column: &dyn Column,
    value: Option<Value>,
    coerce: impl FnOnce(Value) -> Result<Value, String>,
) -> ColumnResult<Option<Value>> {
    column
        .check_required(value)?
        .map(|v| coerce(v).map_err(|m| ColumnError::validation(column.label(), m)))
        .transpose()
}

fn check_length(len: usize, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    if let Some(min) = min {
        if len < min {
            return Err(format!("Length of value ({len}) is less than min_length ({min})"));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Err(format!("Length of value ({len}) is greater than max_length ({max})"));
        }
    }
    Ok(())
}

// ── Text ─────────────────────────────────────────────────────────

/// UTF-8 text. A required text column defaults to `min_length = 1`.
#[derive(Debug, Clone, Default)]
pub struct Text {
    options: ColumnOptions,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

column_builder!(Text);

impl Text {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    fn effective_min(&self) -> Option<usize> {
        self.min_length
            .or(if self.options.required { Some(1) } else { None })
    }

    fn check_text(&self, value: Value) -> Result<Value, String> {
        let text = value
            .as_str()
            .ok_or_else(|| format!("{value} is not a string"))?;
        check_length(text.chars().count(), self.effective_min(), self.max_length)?;
        Ok(value)
    }
}

impl Column for Text {
    fn kind(&self) -> String {
        "text".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, |v| self.check_text(v))
    }
}

// ── Ascii ────────────────────────────────────────────────────────

/// Text restricted to ASCII characters.
#[derive(Debug, Clone, Default)]
pub struct Ascii {
    inner: Text,
}

column_builder!(Ascii, inner.options);

impl Ascii {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.inner = self.inner.min_length(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.inner = self.inner.max_length(max);
        self
    }
}

impl Column for Ascii {
    fn kind(&self) -> String {
        "ascii".into()
    }

    fn options(&self) -> &ColumnOptions {
        self.inner.options()
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        self.inner.options_mut()
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, |v| {
            let v = self.inner.check_text(v)?;
            match v.as_str() {
                Some(s) if !s.is_ascii() => Err(format!("{v} is not an ASCII string")),
                _ => Ok(v),
            }
        })
    }
}

// ── Integer / BigInt ─────────────────────────────────────────────

fn coerce_integer(value: Value) -> Result<i64, String> {
    match &value {
        Value::Int(n) => Ok(i64::from(*n)),
        Value::BigInt(n) => Ok(*n),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{value} is not a valid integer")),
        _ => Err(format!("{value} is not a valid integer")),
    }
}

fn coerce_int(value: Value) -> Result<Value, String> {
    let n = coerce_integer(value)?;
    i32::try_from(n)
        .map(Value::Int)
        .map_err(|_| format!("{n} is out of range for int"))
}

fn coerce_bigint(value: Value) -> Result<Value, String> {
    coerce_integer(value).map(Value::BigInt)
}

/// 32-bit signed integer.
#[derive(Debug, Clone, Default)]
pub struct Integer {
    options: ColumnOptions,
}

column_builder!(Integer);

impl Integer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for Integer {
    fn kind(&self) -> String {
        "int".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_int)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_int)
    }
}

/// 64-bit signed integer.
#[derive(Debug, Clone, Default)]
pub struct BigInt {
    options: ColumnOptions,
}

column_builder!(BigInt);

impl BigInt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for BigInt {
    fn kind(&self) -> String {
        "bigint".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_bigint)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_bigint)
    }
}

// ── Boolean ──────────────────────────────────────────────────────

fn coerce_bool(value: Value) -> Result<Value, String> {
    match &value {
        Value::Boolean(_) => Ok(value),
        Value::Int(n) => Ok(Value::Boolean(*n != 0)),
        Value::BigInt(n) => Ok(Value::Boolean(*n != 0)),
        Value::Text(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Boolean(true)),
        Value::Text(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Boolean(false)),
        _ => Err(format!("{value} is not a valid boolean")),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Boolean {
    options: ColumnOptions,
}

column_builder!(Boolean);

impl Boolean {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for Boolean {
    fn kind(&self) -> String {
        "boolean".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_bool)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_bool)
    }
}

// ── Double ───────────────────────────────────────────────────────

fn coerce_double(value: Value) -> Result<Value, String> {
    match &value {
        Value::Double(_) => Ok(value),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| format!("{value} is not a valid double")),
        _ => value
            .as_f64()
            .map(Value::Double)
            .ok_or_else(|| format!("{value} is not a valid double")),
    }
}

/// 64-bit float; integers are widened.
#[derive(Debug, Clone, Default)]
pub struct Double {
    options: ColumnOptions,
}

column_builder!(Double);

impl Double {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for Double {
    fn kind(&self) -> String {
        "double".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_double)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_double)
    }
}

// ── UUID ─────────────────────────────────────────────────────────

fn coerce_uuid(value: Value) -> Result<Value, String> {
    match &value {
        Value::Uuid(_) => Ok(value),
        Value::Text(s) => {
            Value::parse_uuid(s).map_err(|_| format!("{value} is not a valid uuid"))
        }
        _ => Err(format!("{value} is not a valid uuid")),
    }
}

/// UUID column; accepts the textual form on input.
#[derive(Debug, Clone, Default)]
pub struct UuidColumn {
    options: ColumnOptions,
}

column_builder!(UuidColumn);

impl UuidColumn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A column that defaults to a fresh random UUID.
    #[must_use]
    pub fn random_default() -> Self {
        Self::new().default_fn(|| Value::Uuid(uuid::Uuid::new_v4()))
    }
}

impl Column for UuidColumn {
    fn kind(&self) -> String {
        "uuid".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_uuid)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_uuid)
    }
}

// ── Timestamp ────────────────────────────────────────────────────

fn coerce_timestamp(value: Value) -> Result<Value, String> {
    match &value {
        Value::Timestamp(_) => Ok(value),
        Value::Int(_) | Value::BigInt(_) => value
            .as_i64()
            .map(Value::Timestamp)
            .ok_or_else(|| format!("{value} is not a valid timestamp")),
        _ => Err(format!("{value} is not a valid timestamp")),
    }
}

/// Milliseconds since the Unix epoch; integers are taken as milliseconds.
#[derive(Debug, Clone, Default)]
pub struct Timestamp {
    options: ColumnOptions,
}

column_builder!(Timestamp);

impl Timestamp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for Timestamp {
    fn kind(&self) -> String {
        "timestamp".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn to_value(&self, raw: Option<Value>) -> ColumnResult<Option<Value>> {
        convert_with(self, raw, coerce_timestamp)
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, coerce_timestamp)
    }
}

// ── Blob ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Blob {
    options: ColumnOptions,
}

column_builder!(Blob);

impl Blob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Column for Blob {
    fn kind(&self) -> String {
        "blob".into()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    fn validate(&self, value: Option<Value>) -> ColumnResult<Option<Value>> {
        validate_with(self, value, |v| match v {
            Value::Blob(_) => Ok(v),
            other => Err(format!("{other} is not a blob")),
        })
    }
}
