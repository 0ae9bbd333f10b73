use crate::model::ValueType;
use crate::wasm::WasmType;

/// Map a source value type to the target primitive that represents it.
pub fn map_type(ty: &ValueType) -> WasmType {
    match ty {
        ValueType::Boolean | ValueType::Byte | ValueType::Short | ValueType::Char | ValueType::Int => {
            WasmType::Int32
        }
        ValueType::Long => WasmType::Int64,
        ValueType::Float => WasmType::Float32,
        ValueType::Double => WasmType::Float64,
        ValueType::Object(_) | ValueType::Array(_) => WasmType::Reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        for ty in [
            ValueType::Boolean,
            ValueType::Byte,
            ValueType::Short,
            ValueType::Char,
            ValueType::Int,
        ] {
            assert_eq!(map_type(&ty), WasmType::Int32, "{}", ty);
        }
        assert_eq!(map_type(&ValueType::Long), WasmType::Int64);
    }

    #[test]
    fn test_floats() {
        assert_eq!(map_type(&ValueType::Float), WasmType::Float32);
        assert_eq!(map_type(&ValueType::Double), WasmType::Float64);
    }

    #[test]
    fn test_references_collapse() {
        assert_eq!(map_type(&ValueType::object("java/lang/String")), WasmType::Reference);
        assert_eq!(map_type(&ValueType::array_of(ValueType::Int)), WasmType::Reference);
        assert_eq!(
            map_type(&ValueType::array_of(ValueType::array_of(ValueType::Double))),
            WasmType::Reference
        );
    }
}
