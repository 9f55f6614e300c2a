use std::{fmt, ops, str::FromStr, sync::LazyLock};

use regex::Regex;

/// Dimensional exponents over the base dimensions used by the registry.
///
/// Each field is the exponent of one base dimension, so `m/s` is
/// `length: 1, time: -1` and a dimensionless ratio is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    /// Length exponent (metre).
    pub length: i8,
    /// Mass exponent (kilogram).
    pub mass: i8,
    /// Time exponent (second).
    pub time: i8,
    /// Electric current exponent (ampere).
    pub current: i8,
    /// Thermodynamic temperature exponent (kelvin).
    pub temperature: i8,
}

impl Dimension {
    const NONE: Self = Self {
        length: 0,
        mass: 0,
        time: 0,
        current: 0,
        temperature: 0,
    };

    /// Whether all exponents are zero.
    #[must_use]
    pub const fn is_dimensionless(self) -> bool {
        self.length == 0
            && self.mass == 0
            && self.time == 0
            && self.current == 0
            && self.temperature == 0
    }

    const fn scaled(self, factor: i8) -> Self {
        Self {
            length: self.length * factor,
            mass: self.mass * factor,
            time: self.time * factor,
            current: self.current * factor,
            temperature: self.temperature * factor,
        }
    }

    const fn combined(self, other: Self) -> Self {
        Self {
            length: self.length + other.length,
            mass: self.mass + other.mass,
            time: self.time + other.time,
            current: self.current + other.current,
            temperature: self.temperature + other.temperature,
        }
    }
}

/// A single named unit known to the registry.
struct BaseUnit {
    symbol: &'static str,
    dimension: Dimension,
    /// Multiplier converting one of this unit into coherent SI base units.
    scale: f64,
    /// Additive offset to the SI base value. Non-zero only for °C.
    offset: f64,
}

const fn dim(length: i8, mass: i8, time: i8, current: i8, temperature: i8) -> Dimension {
    Dimension {
        length,
        mass,
        time,
        current,
        temperature,
    }
}

/// The unit registry.
///
/// Covers the SI base and derived units exercised by engineering documents,
/// plus the common multiples. Aliases share a row by appearing as separate
/// entries with identical dimension and scale.
const REGISTRY: &[BaseUnit] = &[
    // length
    BaseUnit { symbol: "m", dimension: dim(1, 0, 0, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "cm", dimension: dim(1, 0, 0, 0, 0), scale: 1e-2, offset: 0.0 },
    BaseUnit { symbol: "mm", dimension: dim(1, 0, 0, 0, 0), scale: 1e-3, offset: 0.0 },
    BaseUnit { symbol: "km", dimension: dim(1, 0, 0, 0, 0), scale: 1e3, offset: 0.0 },
    // mass
    BaseUnit { symbol: "kg", dimension: dim(0, 1, 0, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "g", dimension: dim(0, 1, 0, 0, 0), scale: 1e-3, offset: 0.0 },
    BaseUnit { symbol: "t", dimension: dim(0, 1, 0, 0, 0), scale: 1e3, offset: 0.0 },
    // time
    BaseUnit { symbol: "s", dimension: dim(0, 0, 1, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "min", dimension: dim(0, 0, 1, 0, 0), scale: 60.0, offset: 0.0 },
    BaseUnit { symbol: "h", dimension: dim(0, 0, 1, 0, 0), scale: 3600.0, offset: 0.0 },
    // current
    BaseUnit { symbol: "A", dimension: dim(0, 0, 0, 1, 0), scale: 1.0, offset: 0.0 },
    // temperature
    BaseUnit { symbol: "K", dimension: dim(0, 0, 0, 0, 1), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "°C", dimension: dim(0, 0, 0, 0, 1), scale: 1.0, offset: 273.15 },
    BaseUnit { symbol: "degC", dimension: dim(0, 0, 0, 0, 1), scale: 1.0, offset: 273.15 },
    // derived
    BaseUnit { symbol: "N", dimension: dim(1, 1, -2, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "Pa", dimension: dim(-1, 1, -2, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "kPa", dimension: dim(-1, 1, -2, 0, 0), scale: 1e3, offset: 0.0 },
    BaseUnit { symbol: "bar", dimension: dim(-1, 1, -2, 0, 0), scale: 1e5, offset: 0.0 },
    BaseUnit { symbol: "J", dimension: dim(2, 1, -2, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "kJ", dimension: dim(2, 1, -2, 0, 0), scale: 1e3, offset: 0.0 },
    BaseUnit { symbol: "W", dimension: dim(2, 1, -3, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "kW", dimension: dim(2, 1, -3, 0, 0), scale: 1e3, offset: 0.0 },
    BaseUnit { symbol: "MW", dimension: dim(2, 1, -3, 0, 0), scale: 1e6, offset: 0.0 },
    BaseUnit { symbol: "Hz", dimension: dim(0, 0, -1, 0, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "V", dimension: dim(2, 1, -3, -1, 0), scale: 1.0, offset: 0.0 },
    BaseUnit { symbol: "L", dimension: dim(3, 0, 0, 0, 0), scale: 1e-3, offset: 0.0 },
    // dimensionless
    BaseUnit { symbol: "percent", dimension: Dimension::NONE, scale: 1e-2, offset: 0.0 },
    BaseUnit { symbol: "%", dimension: Dimension::NONE, scale: 1e-2, offset: 0.0 },
];

fn lookup(symbol: &str) -> Option<&'static BaseUnit> {
    REGISTRY.iter().find(|unit| unit.symbol == symbol)
}

/// Errors raised when constructing or combining quantities.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QuantityError {
    /// The unit expression contains a symbol the registry does not know.
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    /// The unit expression is malformed.
    #[error("invalid unit expression '{0}'")]
    Syntax(String),

    /// An offset unit (°C) appeared in a compound expression or with an
    /// exponent, where the offset has no meaning.
    #[error("offset unit '{0}' cannot be used in a compound expression")]
    OffsetUnitInCompound(String),

    /// Two quantities with different dimensions were added, subtracted or
    /// converted into one another.
    #[error("incompatible units '{0}' and '{1}'")]
    IncompatibleUnits(String, String),

    /// Addition or subtraction involving an offset unit is ambiguous;
    /// convert to 'K' first.
    #[error("ambiguous arithmetic on offset unit '{0}'")]
    OffsetArithmetic(String),

    /// The magnitude could not be parsed as a number.
    #[error("invalid magnitude '{0}'")]
    Magnitude(String),
}

/// One factor of a unit expression: a registry symbol raised to a power.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Factor {
    symbol: String,
    exponent: i32,
}

/// A validated unit expression.
///
/// Units are parsed from strings such as `"m"`, `"m^2"`, `"kg/s"` or
/// `"W/m^2/K"` against a fixed registry. Products use `*` (or `·`),
/// quotients use `/` applied left to right, and powers use `^` with an
/// integer exponent. A parsed unit remembers the factors it was written
/// with, so formatting a quantity reproduces the author's spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    factors: Vec<Factor>,
    dimension: Dimension,
    scale: f64,
    offset: f64,
}

static FACTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<symbol>[A-Za-z°%]+)(?:\^(?P<exponent>-?\d+))?$").expect("valid pattern")
});

impl Unit {
    /// The dimensionless unit.
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self {
            factors: Vec::new(),
            dimension: Dimension::NONE,
            scale: 1.0,
            offset: 0.0,
        }
    }

    /// Parses a unit expression against the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is malformed, contains an unknown
    /// symbol, or uses an offset unit (°C) in a compound expression.
    pub fn parse(expression: &str) -> Result<Self, QuantityError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Ok(Self::dimensionless());
        }

        let mut factors = Vec::new();
        // Split into factors, tracking whether each one divides or multiplies.
        for (token, sign) in tokenize(trimmed)? {
            let captures = FACTOR_RE
                .captures(token)
                .ok_or_else(|| QuantityError::Syntax(expression.to_string()))?;
            let symbol = &captures["symbol"];
            let exponent: i32 = captures
                .name("exponent")
                .map_or(Ok(1), |m| m.as_str().parse())
                .map_err(|_| QuantityError::Syntax(expression.to_string()))?;

            if lookup(symbol).is_none() {
                return Err(QuantityError::UnknownUnit(symbol.to_string()));
            }
            factors.push(Factor {
                symbol: symbol.to_string(),
                exponent: exponent * sign,
            });
        }

        Self::from_factors(factors)
    }

    fn from_factors(factors: Vec<Factor>) -> Result<Self, QuantityError> {
        let mut dimension = Dimension::NONE;
        let mut scale = 1.0f64;
        let mut offset = 0.0f64;

        let simple = factors.len() == 1 && factors[0].exponent == 1;
        for factor in &factors {
            let base = lookup(&factor.symbol)
                .ok_or_else(|| QuantityError::UnknownUnit(factor.symbol.clone()))?;
            if base.offset != 0.0 && !simple {
                return Err(QuantityError::OffsetUnitInCompound(factor.symbol.clone()));
            }
            let exponent_i8 = i8::try_from(factor.exponent)
                .map_err(|_| QuantityError::Syntax(factor.symbol.clone()))?;
            dimension = dimension.combined(base.dimension.scaled(exponent_i8));
            scale *= base.scale.powi(factor.exponent);
            offset = base.offset;
        }

        Ok(Self {
            factors,
            dimension,
            scale,
            offset,
        })
    }

    /// The dimensional exponents of this unit.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Whether the unit carries an additive offset (°C).
    #[must_use]
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }

    /// Whether the unit is dimensionless.
    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    fn multiplied(&self, other: &Self) -> Self {
        let mut factors = self.factors.clone();
        for factor in &other.factors {
            merge_factor(&mut factors, factor);
        }
        // Offset units never reach here; callers normalise them first.
        Self::from_factors(factors).expect("factors were already validated")
    }

    fn inverted(&self) -> Self {
        let factors = self
            .factors
            .iter()
            .map(|factor| Factor {
                symbol: factor.symbol.clone(),
                exponent: -factor.exponent,
            })
            .collect();
        Self::from_factors(factors).expect("factors were already validated")
    }
}

fn merge_factor(factors: &mut Vec<Factor>, new: &Factor) {
    match factors.iter_mut().find(|f| f.symbol == new.symbol) {
        Some(existing) => existing.exponent += new.exponent,
        None => factors.push(new.clone()),
    }
    factors.retain(|f| f.exponent != 0);
}

/// Splits a unit expression into `(token, sign)` pairs, where sign is `1`
/// for multiplied factors and `-1` for divided ones.
fn tokenize(expression: &str) -> Result<Vec<(&str, i32)>, QuantityError> {
    let mut tokens = Vec::new();
    let mut sign = 1;
    let mut start = 0;
    for (index, character) in expression.char_indices() {
        if matches!(character, '*' | '·' | '/') {
            let token = expression[start..index].trim();
            if token.is_empty() {
                return Err(QuantityError::Syntax(expression.to_string()));
            }
            tokens.push((token, sign));
            sign = if character == '/' { -1 } else { 1 };
            start = index + character.len_utf8();
        }
    }
    let last = expression[start..].trim();
    if last.is_empty() {
        return Err(QuantityError::Syntax(expression.to_string()));
    }
    tokens.push((last, sign));
    Ok(tokens)
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positive: Vec<_> = self.factors.iter().filter(|f| f.exponent > 0).collect();
        let negative: Vec<_> = self.factors.iter().filter(|f| f.exponent < 0).collect();

        if positive.is_empty() && negative.is_empty() {
            return Ok(());
        }

        if positive.is_empty() {
            write!(f, "1")?;
        } else {
            for (index, factor) in positive.iter().enumerate() {
                if index > 0 {
                    write!(f, "*")?;
                }
                write!(f, "{}", factor.symbol)?;
                if factor.exponent != 1 {
                    write!(f, "^{}", factor.exponent)?;
                }
            }
        }
        for factor in negative {
            write!(f, "/{}", factor.symbol)?;
            if factor.exponent != -1 {
                write!(f, "^{}", -factor.exponent)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Unit {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A physical quantity: a magnitude paired with a validated [`Unit`].
///
/// Quantities parse from `"<magnitude> <unit>"` strings and format back to
/// the same spelling, so values round-trip through their string form.
///
/// ```
/// use pyforge::Quantity;
///
/// let width: Quantity = "2 m".parse().unwrap();
/// let height = Quantity::new(3.0, "m").unwrap();
/// let area = width * height;
/// assert_eq!(area.to_string(), "6 m^2");
/// assert_eq!(area.to("cm^2").unwrap().magnitude(), 60_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Constructs a quantity from a magnitude and a unit expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit expression is not resolvable by the
    /// registry.
    pub fn new(magnitude: f64, unit: &str) -> Result<Self, QuantityError> {
        Ok(Self {
            magnitude,
            unit: Unit::parse(unit)?,
        })
    }

    /// A dimensionless quantity.
    #[must_use]
    pub const fn dimensionless(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::dimensionless(),
        }
    }

    /// The numeric magnitude, in this quantity's own unit.
    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The unit of this quantity.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The magnitude expressed in coherent SI base units.
    #[must_use]
    pub fn base_magnitude(&self) -> f64 {
        self.magnitude.mul_add(self.unit.scale, self.unit.offset)
    }

    /// Converts this quantity to another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the target unit is unknown or has a different
    /// dimension.
    pub fn to(&self, unit: &str) -> Result<Self, QuantityError> {
        let target = Unit::parse(unit)?;
        if target.dimension != self.unit.dimension {
            return Err(QuantityError::IncompatibleUnits(
                self.unit.to_string(),
                target.to_string(),
            ));
        }
        let magnitude = (self.base_magnitude() - target.offset) / target.scale;
        Ok(Self {
            magnitude,
            unit: target,
        })
    }

    /// Adds another quantity, expressed in this quantity's unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ, or if either side carries
    /// an offset unit (convert to `K` first).
    pub fn try_add(&self, other: &Self) -> Result<Self, QuantityError> {
        self.combine(other, |lhs, rhs| lhs + rhs)
    }

    /// Subtracts another quantity, expressed in this quantity's unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ, or if either side carries
    /// an offset unit (convert to `K` first).
    pub fn try_sub(&self, other: &Self) -> Result<Self, QuantityError> {
        self.combine(other, |lhs, rhs| lhs - rhs)
    }

    fn combine(
        &self,
        other: &Self,
        operation: fn(f64, f64) -> f64,
    ) -> Result<Self, QuantityError> {
        if self.unit.has_offset() {
            return Err(QuantityError::OffsetArithmetic(self.unit.to_string()));
        }
        if other.unit.has_offset() {
            return Err(QuantityError::OffsetArithmetic(other.unit.to_string()));
        }
        if self.unit.dimension != other.unit.dimension {
            return Err(QuantityError::IncompatibleUnits(
                self.unit.to_string(),
                other.unit.to_string(),
            ));
        }
        let rhs = other.magnitude * other.unit.scale / self.unit.scale;
        Ok(Self {
            magnitude: operation(self.magnitude, rhs),
            unit: self.unit.clone(),
        })
    }

    /// Rewrites an offset unit (°C) as its absolute base unit so it can
    /// participate in multiplication.
    fn normalised(&self) -> Self {
        if self.unit.has_offset() {
            self.to("K").expect("K shares the temperature dimension")
        } else {
            self.clone()
        }
    }
}

impl ops::Mul for Quantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let lhs = self.normalised();
        let rhs = rhs.normalised();
        Self {
            magnitude: lhs.magnitude * rhs.magnitude,
            unit: lhs.unit.multiplied(&rhs.unit),
        }
    }
}

impl ops::Div for Quantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let lhs = self.normalised();
        let rhs = rhs.normalised();
        Self {
            magnitude: lhs.magnitude / rhs.magnitude,
            unit: lhs.unit.multiplied(&rhs.unit.inverted()),
        }
    }
}

impl ops::Mul<f64> for Quantity {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            magnitude: self.magnitude * rhs,
            unit: self.unit,
        }
    }
}

impl ops::Div<f64> for Quantity {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            magnitude: self.magnitude / rhs,
            unit: self.unit,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.factors.is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (magnitude_str, unit_str) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let magnitude: f64 = magnitude_str
            .parse()
            .map_err(|_| QuantityError::Magnitude(magnitude_str.to_string()))?;
        Ok(Self {
            magnitude,
            unit: Unit::parse(unit_str)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_unit_fails_validation() {
        let error = Quantity::new(1.0, "furlongs").unwrap_err();
        assert_eq!(error, QuantityError::UnknownUnit("furlongs".to_string()));
    }

    #[test]
    fn recognised_unit_round_trips_through_parsing() {
        let quantity: Quantity = "10000 W".parse().unwrap();
        assert_eq!(quantity.magnitude(), 10000.0);
        assert_eq!(quantity.to_string(), "10000 W");

        let reparsed: Quantity = quantity.to_string().parse().unwrap();
        assert_eq!(reparsed, quantity);
    }

    #[test]
    fn compound_units_round_trip() {
        for expression in ["0.05 kg/s", "1.5 m^2", "3 W/m^2/K"] {
            let quantity: Quantity = expression.parse().unwrap();
            assert_eq!(quantity.to_string(), expression);
        }
    }

    #[test]
    fn multiplication_composes_dimensions() {
        let width = Quantity::new(2.0, "m").unwrap();
        let height = Quantity::new(3.0, "m").unwrap();
        let area = width * height;
        assert_eq!(area.to_string(), "6 m^2");

        let converted = area.to("cm^2").unwrap();
        assert_eq!(converted.magnitude(), 6.0 * 100.0 * 100.0);
    }

    #[test]
    fn division_cancels_dimensions() {
        let distance = Quantity::new(5.0, "m").unwrap();
        let time = Quantity::new(2.0, "s").unwrap();
        let speed = distance / time;
        assert_eq!(speed.to_string(), "2.5 m/s");
    }

    #[test]
    fn incompatible_addition_fails() {
        let length = Quantity::new(1.0, "m").unwrap();
        let mass = Quantity::new(1.0, "kg").unwrap();
        assert!(matches!(
            length.try_add(&mass),
            Err(QuantityError::IncompatibleUnits(..))
        ));
    }

    #[test]
    fn addition_converts_to_lhs_unit() {
        let metres = Quantity::new(1.0, "m").unwrap();
        let centimetres = Quantity::new(50.0, "cm").unwrap();
        let total = metres.try_add(&centimetres).unwrap();
        assert_eq!(total.to_string(), "1.5 m");
    }

    #[test]
    fn celsius_converts_to_kelvin() {
        let cold = Quantity::new(-5.0, "°C").unwrap();
        let kelvin = cold.to("K").unwrap();
        assert!((kelvin.magnitude() - 268.15).abs() < 1e-9);

        let back = kelvin.to("degC").unwrap();
        assert!((back.magnitude() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn offset_unit_rejected_in_compound_expression() {
        assert!(matches!(
            Unit::parse("°C/s"),
            Err(QuantityError::OffsetUnitInCompound(_))
        ));
        assert!(matches!(
            Unit::parse("°C^2"),
            Err(QuantityError::OffsetUnitInCompound(_))
        ));
    }

    #[test]
    fn offset_unit_addition_is_ambiguous() {
        let a = Quantity::new(20.0, "°C").unwrap();
        let b = Quantity::new(5.0, "K").unwrap();
        assert!(matches!(
            a.try_add(&b),
            Err(QuantityError::OffsetArithmetic(_))
        ));
    }

    #[test]
    fn conversion_between_incompatible_units_fails() {
        let power = Quantity::new(1.0, "W").unwrap();
        assert!(matches!(
            power.to("m"),
            Err(QuantityError::IncompatibleUnits(..))
        ));
    }

    #[test]
    fn percent_is_dimensionless() {
        let ratio = Quantity::new(50.0, "percent").unwrap();
        assert!(ratio.unit().is_dimensionless());
        assert_eq!(ratio.to("%").unwrap().magnitude(), 50.0);
    }

    #[test]
    fn malformed_expressions_fail() {
        assert!(matches!(
            Unit::parse("m//s"),
            Err(QuantityError::Syntax(_))
        ));
        assert!(matches!(
            Unit::parse("m^two"),
            Err(QuantityError::Syntax(_))
        ));
    }

    #[test]
    fn scalar_scaling_keeps_the_unit() {
        let power = Quantity::new(10.0, "kW").unwrap();
        let doubled = power * 2.0;
        assert_eq!(doubled.to_string(), "20 kW");
    }
}
