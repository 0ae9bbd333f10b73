use binrw::binrw;
use wasm_encoder::{Encode, TypeSection, ValType};

use super::expression::WasmExpression;

/// WebAssembly value types produced by the generator.
///
/// Every reference type of the source model collapses to [`WasmType::Reference`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[binrw]
#[brw(big)]
pub enum WasmType {
    #[brw(magic = 0x7fu8)]
    Int32,
    #[brw(magic = 0x7eu8)]
    Int64,
    #[brw(magic = 0x7du8)]
    Float32,
    #[brw(magic = 0x7cu8)]
    Float64,
    #[brw(magic = 0x6fu8)]
    Reference,
}

impl From<WasmType> for ValType {
    fn from(ty: WasmType) -> Self {
        match ty {
            WasmType::Int32 => ValType::I32,
            WasmType::Int64 => ValType::I64,
            WasmType::Float32 => ValType::F32,
            WasmType::Float64 => ValType::F64,
            WasmType::Reference => ValType::EXTERNREF,
        }
    }
}

fn val_types(types: &[WasmType]) -> Vec<ValType> {
    types.iter().copied().map(ValType::from).collect()
}

/// Leading byte of a function type in the type section.
pub const FUNCTION_TYPE_FORM: u8 = 0x60;

/// A function type: parameter and result value types.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WasmFunctionType {
    pub params: Vec<WasmType>,
    pub results: Vec<WasmType>,
}

impl WasmFunctionType {
    pub fn new(params: Vec<WasmType>, results: Vec<WasmType>) -> Self {
        Self { params, results }
    }

    /// Append this type to `section` and return its type index.
    pub fn add_to(&self, section: &mut TypeSection) -> u32 {
        let index = section.len();
        section
            .ty()
            .function(val_types(&self.params), val_types(&self.results));
        index
    }

    /// Bytes of the type-section entry: `0x60 vec(params) vec(results)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sink = vec![FUNCTION_TYPE_FORM];
        val_types(&self.params).as_slice().encode(&mut sink);
        val_types(&self.results).as_slice().encode(&mut sink);
        sink
    }
}

/// A local variable slot of a function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WasmLocal {
    pub ty: WasmType,
    pub name: Option<String>,
}

impl WasmLocal {
    pub fn new(ty: WasmType, name: Option<String>) -> Self {
        Self { ty, name }
    }
}

/// Host linkage of an imported function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportLinkage {
    /// `None` only for the unresolved sentinel.
    pub module: Option<String>,
    pub name: String,
}

impl ImportLinkage {
    /// Name given to imports that have no registration.
    pub const UNRESOLVED_NAME: &'static str = "<unknown>";

    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            name: name.into(),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            module: None,
            name: Self::UNRESOLVED_NAME.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.module.is_some()
    }
}

/// A generated function: either a body or an import, never both.
#[derive(Clone, Debug, PartialEq)]
pub struct WasmFunction {
    pub name: String,
    pub parameters: Vec<WasmType>,
    pub result: Option<WasmType>,
    /// Parameters come first: `locals[..parameters.len()]` mirrors `parameters`.
    pub locals: Vec<WasmLocal>,
    pub body: Option<WasmExpression>,
    pub import: Option<ImportLinkage>,
}

impl WasmFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            result: None,
            locals: Vec::new(),
            body: None,
            import: None,
        }
    }

    /// Append a local and return its index.
    pub fn add_local(&mut self, local: WasmLocal) -> usize {
        self.locals.push(local);
        self.locals.len() - 1
    }

    pub fn is_import(&self) -> bool {
        self.import.is_some()
    }

    pub fn signature(&self) -> WasmFunctionType {
        WasmFunctionType::new(self.parameters.clone(), self.result.into_iter().collect())
    }
}
