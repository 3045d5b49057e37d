//! Numeric storage types of NetCDF variables.

use netcdf::AttributeValue;
use netcdf::types::{FloatType, IntType, NcVariableType};

use crate::dataset::numeric_values;

/// On-disk numeric type of a variable or attribute.
///
/// Values always pass through this crate as `f64`; the storage type decides
/// what NetCDF converts them to when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ValueType {
    /// The storage type of a NetCDF variable, or `None` for text and
    /// user-defined types.
    pub fn from_nc(nc: &NcVariableType) -> Option<Self> {
        match nc {
            NcVariableType::Int(IntType::I8) => Some(Self::I8),
            NcVariableType::Int(IntType::U8) => Some(Self::U8),
            NcVariableType::Int(IntType::I16) => Some(Self::I16),
            NcVariableType::Int(IntType::U16) => Some(Self::U16),
            NcVariableType::Int(IntType::I32) => Some(Self::I32),
            NcVariableType::Int(IntType::U32) => Some(Self::U32),
            NcVariableType::Int(IntType::I64) => Some(Self::I64),
            NcVariableType::Int(IntType::U64) => Some(Self::U64),
            NcVariableType::Float(FloatType::F32) => Some(Self::F32),
            NcVariableType::Float(FloatType::F64) => Some(Self::F64),
            _ => None,
        }
    }

    /// The matching NetCDF type.
    pub fn to_nc(self) -> NcVariableType {
        match self {
            Self::I8 => NcVariableType::Int(IntType::I8),
            Self::U8 => NcVariableType::Int(IntType::U8),
            Self::I16 => NcVariableType::Int(IntType::I16),
            Self::U16 => NcVariableType::Int(IntType::U16),
            Self::I32 => NcVariableType::Int(IntType::I32),
            Self::U32 => NcVariableType::Int(IntType::U32),
            Self::I64 => NcVariableType::Int(IntType::I64),
            Self::U64 => NcVariableType::Int(IntType::U64),
            Self::F32 => NcVariableType::Float(FloatType::F32),
            Self::F64 => NcVariableType::Float(FloatType::F64),
        }
    }

    /// Element type of a numeric attribute value.
    pub fn of_attribute(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Schar(_) | AttributeValue::Schars(_) => Some(Self::I8),
            AttributeValue::Uchar(_) | AttributeValue::Uchars(_) => Some(Self::U8),
            AttributeValue::Short(_) | AttributeValue::Shorts(_) => Some(Self::I16),
            AttributeValue::Ushort(_) | AttributeValue::Ushorts(_) => Some(Self::U16),
            AttributeValue::Int(_) | AttributeValue::Ints(_) => Some(Self::I32),
            AttributeValue::Uint(_) | AttributeValue::Uints(_) => Some(Self::U32),
            AttributeValue::Longlong(_) | AttributeValue::Longlongs(_) => Some(Self::I64),
            AttributeValue::Ulonglong(_) | AttributeValue::Ulonglongs(_) => Some(Self::U64),
            AttributeValue::Float(_) | AttributeValue::Floats(_) => Some(Self::F32),
            AttributeValue::Double(_) | AttributeValue::Doubles(_) => Some(Self::F64),
            _ => None,
        }
    }

    /// `value` stored as this type.
    ///
    /// Values already of this type, and non-numeric values, are returned
    /// unchanged.
    pub fn coerce(self, value: &AttributeValue) -> AttributeValue {
        match Self::of_attribute(value) {
            None => value.clone(),
            Some(t) if t == self => value.clone(),
            Some(_) => self.attribute(&numeric_values(value)),
        }
    }

    fn attribute(self, values: &[f64]) -> AttributeValue {
        macro_rules! pack {
            ($one:ident, $many:ident, $t:ty) => {
                match values {
                    [v] => AttributeValue::$one(*v as $t),
                    _ => AttributeValue::$many(values.iter().map(|&v| v as $t).collect()),
                }
            };
        }
        match self {
            Self::I8 => pack!(Schar, Schars, i8),
            Self::U8 => pack!(Uchar, Uchars, u8),
            Self::I16 => pack!(Short, Shorts, i16),
            Self::U16 => pack!(Ushort, Ushorts, u16),
            Self::I32 => pack!(Int, Ints, i32),
            Self::U32 => pack!(Uint, Uints, u32),
            Self::I64 => pack!(Longlong, Longlongs, i64),
            Self::U64 => pack!(Ulonglong, Ulonglongs, u64),
            Self::F32 => pack!(Float, Floats, f32),
            Self::F64 => pack!(Double, Doubles, f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nc_types_map_both_ways() {
        for t in [
            ValueType::I8,
            ValueType::U8,
            ValueType::I16,
            ValueType::U16,
            ValueType::I32,
            ValueType::U32,
            ValueType::I64,
            ValueType::U64,
            ValueType::F32,
            ValueType::F64,
        ] {
            assert_eq!(ValueType::from_nc(&t.to_nc()), Some(t));
        }
        assert_eq!(ValueType::from_nc(&NcVariableType::Char), None);
        assert_eq!(ValueType::from_nc(&NcVariableType::String), None);
    }

    #[test]
    fn matching_attribute_is_unchanged() {
        let double = AttributeValue::Double(-99.9999);
        assert_eq!(ValueType::F64.coerce(&double), double);
        let shorts = AttributeValue::Shorts(vec![-1, 7]);
        assert_eq!(ValueType::I16.coerce(&shorts), shorts);
    }

    #[test]
    fn differing_attribute_is_converted() {
        assert_eq!(
            ValueType::F32.coerce(&AttributeValue::Double(-99.9999)),
            AttributeValue::Float(-99.9999_f32)
        );
        assert_eq!(
            ValueType::F32.coerce(&AttributeValue::Ints(vec![1, 2])),
            AttributeValue::Floats(vec![1.0, 2.0])
        );
        assert_eq!(
            ValueType::I16.coerce(&AttributeValue::Double(-32767.0)),
            AttributeValue::Short(-32767)
        );
    }

    #[test]
    fn text_attribute_is_unchanged() {
        let text = AttributeValue::Str("none".to_string());
        assert_eq!(ValueType::F64.coerce(&text), text);
    }
}
