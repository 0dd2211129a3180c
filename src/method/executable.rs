// Fri Feb 06 2026 - Alex

use crate::method::AccessFlags;
use std::fmt;

/// Return type reported for constructors.
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// What the patcher needs to know about a reflective method or constructor.
pub trait Member {
    /// Opaque runtime reference; zero means null.
    fn raw(&self) -> u64;
    fn name(&self) -> &str;
    fn declaring_type(&self) -> &str;
    fn modifiers(&self) -> AccessFlags;
    fn parameter_types(&self) -> &[String];
    fn exception_types(&self) -> &[String];
    fn return_type(&self) -> &str;
    fn is_constructor(&self) -> bool;

    fn to_generic_string(&self) -> String {
        let mut out = self.modifiers().java_modifiers();
        if !out.is_empty() {
            out.push(' ');
        }
        if self.is_constructor() {
            out.push_str(self.declaring_type());
        } else {
            out.push_str(self.return_type());
            out.push(' ');
            out.push_str(self.declaring_type());
            out.push('.');
            out.push_str(self.name());
        }
        out.push('(');
        out.push_str(&self.parameter_types().join(","));
        out.push(')');
        if !self.exception_types().is_empty() {
            out.push_str(" throws ");
            out.push_str(&self.exception_types().join(","));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    raw: u64,
    declaring_type: String,
    name: String,
    modifiers: AccessFlags,
    parameter_types: Vec<String>,
    return_type: String,
    exception_types: Vec<String>,
}

impl MethodInfo {
    pub fn new(raw: u64, declaring_type: &str, name: &str, return_type: &str) -> Self {
        Self {
            raw,
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
            modifiers: AccessFlags::empty(),
            parameter_types: Vec::new(),
            return_type: return_type.to_string(),
            exception_types: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: AccessFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_parameters(mut self, parameters: &[&str]) -> Self {
        self.parameter_types = parameters.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_exceptions(mut self, exceptions: &[&str]) -> Self {
        self.exception_types = exceptions.iter().map(|e| e.to_string()).collect();
        self
    }
}

impl Member for MethodInfo {
    fn raw(&self) -> u64 {
        self.raw
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    fn modifiers(&self) -> AccessFlags {
        self.modifiers
    }

    fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    fn exception_types(&self) -> &[String] {
        &self.exception_types
    }

    fn return_type(&self) -> &str {
        &self.return_type
    }

    fn is_constructor(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorInfo {
    raw: u64,
    declaring_type: String,
    modifiers: AccessFlags,
    parameter_types: Vec<String>,
    exception_types: Vec<String>,
}

impl ConstructorInfo {
    pub fn new(raw: u64, declaring_type: &str) -> Self {
        Self {
            raw,
            declaring_type: declaring_type.to_string(),
            modifiers: AccessFlags::empty(),
            parameter_types: Vec::new(),
            exception_types: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: AccessFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_parameters(mut self, parameters: &[&str]) -> Self {
        self.parameter_types = parameters.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_exceptions(mut self, exceptions: &[&str]) -> Self {
        self.exception_types = exceptions.iter().map(|e| e.to_string()).collect();
        self
    }
}

impl Member for ConstructorInfo {
    fn raw(&self) -> u64 {
        self.raw
    }

    // Constructor.getName() is the declaring class name.
    fn name(&self) -> &str {
        &self.declaring_type
    }

    fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    fn modifiers(&self) -> AccessFlags {
        self.modifiers
    }

    fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    fn exception_types(&self) -> &[String] {
        &self.exception_types
    }

    fn return_type(&self) -> &str {
        OBJECT_TYPE
    }

    fn is_constructor(&self) -> bool {
        true
    }
}

/// A hook target: either a method or a constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    Method(MethodInfo),
    Constructor(ConstructorInfo),
}

impl Executable {
    fn member(&self) -> &dyn Member {
        match self {
            Self::Method(method) => method,
            Self::Constructor(constructor) => constructor,
        }
    }

    pub fn is_null(&self) -> bool {
        self.raw() == 0
    }
}

impl Member for Executable {
    fn raw(&self) -> u64 {
        self.member().raw()
    }

    fn name(&self) -> &str {
        self.member().name()
    }

    fn declaring_type(&self) -> &str {
        self.member().declaring_type()
    }

    fn modifiers(&self) -> AccessFlags {
        self.member().modifiers()
    }

    fn parameter_types(&self) -> &[String] {
        self.member().parameter_types()
    }

    fn exception_types(&self) -> &[String] {
        self.member().exception_types()
    }

    fn return_type(&self) -> &str {
        self.member().return_type()
    }

    fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor(_))
    }
}

impl From<MethodInfo> for Executable {
    fn from(method: MethodInfo) -> Self {
        Self::Method(method)
    }
}

impl From<ConstructorInfo> for Executable {
    fn from(constructor: ConstructorInfo) -> Self {
        Self::Constructor(constructor)
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_generic_string())
    }
}
