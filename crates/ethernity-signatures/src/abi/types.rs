use core::fmt;

use ethabi::param_type::{ParamType, Reader};
use ethernity_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Base type name used for tuples.
pub const TUPLE: &str = "tuple";

/// One array suffix of a type, in textual order (`uint8[2][]` is
/// `[Fixed(2), Dynamic]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayDimension {
    Dynamic,
    Fixed(usize),
}

impl fmt::Display for ArrayDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayDimension::Dynamic => f.write_str("[]"),
            ArrayDimension::Fixed(n) => write!(f, "[{n}]"),
        }
    }
}

/// Named member of a tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

/// Structured ABI type.
///
/// `components` is non-empty exactly when `base_type` is `"tuple"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub base_type: String,
    pub dimensions: Vec<ArrayDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl TypeDescriptor {
    /// Validated elementary type, canonicalized (`uint` becomes `uint256`).
    pub fn elementary(name: &str, dimensions: Vec<ArrayDimension>) -> Result<Self> {
        Ok(Self {
            base_type: canonical_elementary(name)?,
            dimensions: check_dimensions(dimensions)?,
            components: Vec::new(),
        })
    }

    pub fn tuple(components: Vec<Component>, dimensions: Vec<ArrayDimension>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::InvalidType("empty tuple".into()));
        }
        Ok(Self {
            base_type: TUPLE.to_string(),
            dimensions: check_dimensions(dimensions)?,
            components,
        })
    }

    pub fn is_tuple(&self) -> bool {
        self.base_type == TUPLE
    }

    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// Element type of an array, i.e. the type with its last dimension removed.
    pub fn element(&self) -> Option<TypeDescriptor> {
        let mut inner = self.clone();
        inner.dimensions.pop()?;
        Some(inner)
    }

    /// Type string as used in JSON ABIs (`tuple[]` rather than `(..)[]`).
    pub fn abi_type(&self) -> String {
        let mut out = self.base_type.clone();
        for dim in &self.dimensions {
            out.push_str(&dim.to_string());
        }
        out
    }
}

/// Canonical form, e.g. `(address,uint256)[2]`.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tuple() {
            f.write_str("(")?;
            for (i, c) in self.components.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", c.ty)?;
            }
            f.write_str(")")?;
        } else {
            f.write_str(&self.base_type)?;
        }
        for dim in &self.dimensions {
            write!(f, "{dim}")?;
        }
        Ok(())
    }
}

fn check_dimensions(dimensions: Vec<ArrayDimension>) -> Result<Vec<ArrayDimension>> {
    if dimensions.contains(&ArrayDimension::Fixed(0)) {
        return Err(Error::InvalidType("zero-length array".into()));
    }
    Ok(dimensions)
}

/// Validates an elementary type name and returns its canonical spelling.
///
/// Everything except fixed-point types goes through `ethabi`'s type reader;
/// the name must survive a round trip through its canonical form.
pub fn canonical_elementary(name: &str) -> Result<String> {
    let invalid = || Error::InvalidType(name.to_string());
    match name {
        "function" => return Ok(name.to_string()),
        "fixed" => return Ok("fixed128x18".into()),
        "ufixed" => return Ok("ufixed128x18".into()),
        _ => {}
    }

    if let Some(mxn) = name.strip_prefix("ufixed").or_else(|| name.strip_prefix("fixed")) {
        let (m, n) = mxn.split_once('x').ok_or_else(invalid)?;
        let m = parse_size(m).ok_or_else(invalid)?;
        let n = parse_size(n).ok_or_else(invalid)?;
        return if m % 8 == 0 && (8..=256).contains(&m) && n <= 80 {
            Ok(name.to_string())
        } else {
            Err(invalid())
        };
    }

    // ethabi reads unknown names as uint8 (solidity enums), the round trip
    // below rejects them
    let param = Reader::read(name).map_err(|_| invalid())?;
    let sized = match &param {
        ParamType::Address | ParamType::Bool | ParamType::String | ParamType::Bytes => true,
        ParamType::Uint(bits) | ParamType::Int(bits) => bits % 8 == 0 && (8..=256).contains(bits),
        ParamType::FixedBytes(len) => (1..=32).contains(len),
        _ => false,
    };
    let canonical = param.to_string();
    if sized && (canonical == name || matches!(name, "uint" | "int")) {
        Ok(canonical)
    } else {
        Err(invalid())
    }
}

/// Decimal without sign or leading zeros.
fn parse_size(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementary_types() {
        for ok in ["address", "bool", "string", "bytes", "uint8", "int256", "bytes32", "bytes1", "fixed128x18", "ufixed8x0"] {
            assert_eq!(canonical_elementary(ok).unwrap(), ok);
        }
        assert_eq!(canonical_elementary("uint").unwrap(), "uint256");
        assert_eq!(canonical_elementary("int").unwrap(), "int256");
        for bad in ["uint7", "uint264", "int0", "bytes0", "bytes33", "uint08", "addr", "tuple", "fixed7x1", "fixed8x81", ""] {
            assert!(canonical_elementary(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn unknown_names_are_not_read_as_enums() {
        for bad in ["Status", "uint8x", "bytes08", "intx", "string2", "addresses"] {
            assert!(matches!(canonical_elementary(bad), Err(Error::InvalidType(_))), "{bad} should be rejected");
        }
        assert_eq!(canonical_elementary("function").unwrap(), "function");
        assert_eq!(canonical_elementary("ufixed").unwrap(), "ufixed128x18");
    }

    #[test]
    fn display_and_abi_type() {
        let inner = TypeDescriptor::elementary("address", vec![]).unwrap();
        let amount = TypeDescriptor::elementary("uint", vec![]).unwrap();
        let ty = TypeDescriptor::tuple(
            vec![
                Component { name: String::new(), ty: inner },
                Component { name: String::new(), ty: amount },
            ],
            vec![ArrayDimension::Fixed(2), ArrayDimension::Dynamic],
        )
        .unwrap();
        assert_eq!(ty.to_string(), "(address,uint256)[2][]");
        assert_eq!(ty.abi_type(), "tuple[2][]");
        assert_eq!(ty.element().unwrap().to_string(), "(address,uint256)[2]");
        assert!(ty.is_tuple() && ty.is_array());
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(TypeDescriptor::tuple(vec![], vec![]).is_err());
        assert!(TypeDescriptor::elementary("uint8", vec![ArrayDimension::Fixed(0)]).is_err());
    }
}
