use std::fmt;

use crate::error::Result;

use super::descriptor;

/// A source-level value type, as written in a JVM descriptor.
///
/// `void` is deliberately absent: a method without a result has a `None`
/// return type in its [`MethodDescriptor`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    /// Internal class name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<ValueType>),
}

impl ValueType {
    pub fn object(class_name: impl Into<String>) -> Self {
        ValueType::Object(class_name.into())
    }

    pub fn array_of(item: ValueType) -> Self {
        ValueType::Array(Box::new(item))
    }

    /// Parse a single field descriptor such as `I` or `[Ljava/lang/Object;`.
    pub fn parse(desc: &str) -> Result<Self> {
        descriptor::parse_value_type(desc)
    }

    /// Returns the JVM descriptor string for this type.
    pub fn to_descriptor(&self) -> String {
        match self {
            ValueType::Boolean => "Z".into(),
            ValueType::Byte => "B".into(),
            ValueType::Short => "S".into(),
            ValueType::Char => "C".into(),
            ValueType::Int => "I".into(),
            ValueType::Long => "J".into(),
            ValueType::Float => "F".into(),
            ValueType::Double => "D".into(),
            ValueType::Object(name) => format!("L{};", name),
            ValueType::Array(inner) => format!("[{}", inner.to_descriptor()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor())
    }
}

/// Name plus signature of a method, independent of its owner.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameter_types: Vec<ValueType>,
    /// `None` for `void`.
    pub return_type: Option<ValueType>,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<ValueType>,
        return_type: Option<ValueType>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_type,
        }
    }

    /// Parse `name(params)return`, e.g. `add(II)I` or `<init>(Ljava/lang/String;)V`.
    pub fn parse(desc: &str) -> Result<Self> {
        descriptor::parse_method_descriptor(desc)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn parameter_type(&self, index: usize) -> Option<&ValueType> {
        self.parameter_types.get(index)
    }

    /// The `(params)return` part in JVM syntax, without the method name.
    pub fn signature_descriptor(&self) -> String {
        let mut out = String::from("(");
        for param in &self.parameter_types {
            out.push_str(&param.to_descriptor());
        }
        out.push(')');
        match &self.return_type {
            Some(ty) => out.push_str(&ty.to_descriptor()),
            None => out.push('V'),
        }
        out
    }

    pub fn is_class_initializer(&self) -> bool {
        self.name == CLASS_INITIALIZER_NAME
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature_descriptor())
    }
}

pub const CLASS_INITIALIZER_NAME: &str = "<clinit>";
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Full identity of a method: owner class plus descriptor.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodReference {
    pub class_name: String,
    pub descriptor: MethodDescriptor,
}

impl MethodReference {
    pub fn new(class_name: impl Into<String>, descriptor: MethodDescriptor) -> Self {
        Self {
            class_name: class_name.into(),
            descriptor,
        }
    }

    /// Build a reference from an owner and a `name(params)return` string.
    pub fn parse(class_name: impl Into<String>, desc: &str) -> Result<Self> {
        Ok(Self::new(class_name, MethodDescriptor::parse(desc)?))
    }

    /// The static initializer reference `<clinit>()V` of a class.
    pub fn class_initializer(class_name: impl Into<String>) -> Self {
        Self::new(class_name, MethodDescriptor::new(CLASS_INITIALIZER_NAME, Vec::new(), None))
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn parameter_count(&self) -> usize {
        self.descriptor.parameter_count()
    }

    pub fn parameter_type(&self, index: usize) -> Option<&ValueType> {
        self.descriptor.parameter_type(index)
    }

    pub fn return_type(&self) -> Option<&ValueType> {
        self.descriptor.return_type.as_ref()
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.descriptor)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct MethodAccessFlags(u16);

bitflags! {
    impl MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;       //	Declared public; may be accessed from outside its package.
        const PRIVATE = 0x0002;      //	Declared private; accessible only within the defining class.
        const PROTECTED = 0x0004;    //	Declared protected; may be accessed within subclasses.
        const STATIC = 0x0008;       //	Declared static.
        const FINAL = 0x0010;        //	Declared final; must not be overridden.
        const SYNCHRONIZED = 0x0020; //	Declared synchronized; invocation is wrapped by a monitor use.
        const BRIDGE = 0x0040;       //	A bridge method, generated by the compiler.
        const VARARGS = 0x0080;      //	Declared with variable number of arguments.
        const NATIVE = 0x0100;       //	Declared native; implemented in a language other than Java.
        const ABSTRACT = 0x0400;     //	Declared abstract; no implementation is provided.
        const STRICT = 0x0800;       //	Declared strictfp; floating-point mode is FP-strict.
        const SYNTHETIC = 0x1000;    //	Declared synthetic; not present in the source code.
    }
}
