use std::fmt;

use serde::Serialize;

use crate::{
    document::{Element, TableData},
    domain::Quantity,
};

/// A single typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// A physical quantity with a unit.
    Quantity(Quantity),
    /// A plain floating point number.
    Number(f64),
    /// An integer count.
    Integer(i64),
    /// A boolean flag.
    Bool(bool),
    /// Free text.
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity(quantity) => write!(f, "{quantity}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Errors raised when building or reading a [`Parameters`] set.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParametersError {
    /// A parameter was declared with an empty name.
    #[error("parameter names must not be empty")]
    EmptyName,

    /// The same parameter name was declared twice.
    #[error("duplicate parameter '{0}'")]
    DuplicateName(String),

    /// The requested parameter does not exist.
    #[error("no parameter named '{0}'")]
    Missing(String),

    /// The parameter exists but holds a different type.
    #[error("parameter '{0}' is not a {1}")]
    WrongType(String, &'static str),
}

/// An immutable, named set of typed engineering values.
///
/// A `Parameters` set is built once, validated during construction, and then
/// frozen: there is no mutation API. It is the single source of truth for
/// the values a document module works with.
///
/// ```
/// use pyforge::{Parameters, Quantity};
///
/// let params = Parameters::builder("heat_pump")
///     .quantity("heating_capacity", Quantity::new(10_000.0, "W").unwrap())
///     .number("cop", 4.0)
///     .integer("design_life", 20)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.number("cop").unwrap(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    name: String,
    fields: Vec<(String, ParameterValue)>,
}

impl Parameters {
    /// Starts building a parameter set with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ParametersBuilder {
        ParametersBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The name of this parameter set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Returns the named quantity parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or holds another type.
    pub fn quantity(&self, name: &str) -> Result<&Quantity, ParametersError> {
        match self.require(name)? {
            ParameterValue::Quantity(quantity) => Ok(quantity),
            _ => Err(ParametersError::WrongType(name.to_string(), "quantity")),
        }
    }

    /// Returns the named number parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or holds another type.
    pub fn number(&self, name: &str) -> Result<f64, ParametersError> {
        match self.require(name)? {
            ParameterValue::Number(number) => Ok(*number),
            _ => Err(ParametersError::WrongType(name.to_string(), "number")),
        }
    }

    /// Returns the named integer parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or holds another type.
    pub fn integer(&self, name: &str) -> Result<i64, ParametersError> {
        match self.require(name)? {
            ParameterValue::Integer(integer) => Ok(*integer),
            _ => Err(ParametersError::WrongType(name.to_string(), "integer")),
        }
    }

    /// Returns the named boolean parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or holds another type.
    pub fn flag(&self, name: &str) -> Result<bool, ParametersError> {
        match self.require(name)? {
            ParameterValue::Bool(flag) => Ok(*flag),
            _ => Err(ParametersError::WrongType(name.to_string(), "flag")),
        }
    }

    /// Returns the named text parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or holds another type.
    pub fn text(&self, name: &str) -> Result<&str, ParametersError> {
        match self.require(name)? {
            ParameterValue::Text(text) => Ok(text),
            _ => Err(ParametersError::WrongType(name.to_string(), "text")),
        }
    }

    fn require(&self, name: &str) -> Result<&ParameterValue, ParametersError> {
        self.get(name)
            .ok_or_else(|| ParametersError::Missing(name.to_string()))
    }

    /// Iterates over the parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Renders the parameter set as a markdown pipe table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "| Parameter | Value |".to_string(),
            "| --- | --- |".to_string(),
        ];
        for (name, value) in self.iter() {
            lines.push(format!("| {name} | {value} |"));
        }
        lines.join("\n")
    }

    /// Converts the parameter set into a document table element.
    #[must_use]
    pub fn to_table(&self, caption: impl Into<String>, label: Option<&str>) -> Element {
        let mut data = TableData::new(["Parameter", "Value"]);
        for (name, value) in self.iter() {
            data.push_row([name.to_string(), value.to_string()]);
        }
        Element::table(data, caption, label.map(ToString::to_string))
    }
}

impl Serialize for Parameters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, &value.to_string())?;
        }
        map.end()
    }
}

/// Builder for [`Parameters`].
///
/// Declaration order is preserved; validation happens in [`build`].
///
/// [`build`]: ParametersBuilder::build
#[derive(Debug)]
pub struct ParametersBuilder {
    name: String,
    fields: Vec<(String, ParameterValue)>,
}

impl ParametersBuilder {
    /// Declares a quantity parameter.
    #[must_use]
    pub fn quantity(self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.field(name, ParameterValue::Quantity(quantity))
    }

    /// Declares a plain number parameter.
    #[must_use]
    pub fn number(self, name: impl Into<String>, number: f64) -> Self {
        self.field(name, ParameterValue::Number(number))
    }

    /// Declares an integer parameter.
    #[must_use]
    pub fn integer(self, name: impl Into<String>, integer: i64) -> Self {
        self.field(name, ParameterValue::Integer(integer))
    }

    /// Declares a boolean parameter.
    #[must_use]
    pub fn flag(self, name: impl Into<String>, flag: bool) -> Self {
        self.field(name, ParameterValue::Bool(flag))
    }

    /// Declares a text parameter.
    #[must_use]
    pub fn text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.field(name, ParameterValue::Text(text.into()))
    }

    /// Declares a parameter with an explicit [`ParameterValue`].
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Validates the declarations and freezes the set.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is empty or declared twice.
    pub fn build(self) -> Result<Parameters, ParametersError> {
        for (index, (name, _)) in self.fields.iter().enumerate() {
            if name.is_empty() {
                return Err(ParametersError::EmptyName);
            }
            if self.fields[..index].iter().any(|(other, _)| other == name) {
                return Err(ParametersError::DuplicateName(name.clone()));
            }
        }
        Ok(Parameters {
            name: self.name,
            fields: self.fields,
        })
    }
}
