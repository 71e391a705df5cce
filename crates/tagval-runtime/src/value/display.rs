use std::fmt::{Debug, Display};

use super::*;
use crate::object::*;
use crate::tag::TypeTag;

fn write_float(f: &mut std::fmt::Formatter<'_>, float: f64) -> std::fmt::Result {
    if float.is_nan() {
        write!(f, "NaN")
    } else if float.is_infinite() {
        write!(f, "{}Infinity", if float < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{:?}", float)
    }
}

impl Display for Fixnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Flonum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_float(f, self.0)
    }
}

impl Display for StaticSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#<Symbol:{}>", self.0 .0)
    }
}

impl Display for HeapRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let addr = self.0 .0;
        match self.type_tag() {
            TypeTag::Float => match self.payload::<RFloat>() {
                Ok(float) => write_float(f, float.0),
                Err(_) => write!(f, "#<Float:{addr:#x}>"),
            },
            TypeTag::Bignum => match self.payload::<RBignum>() {
                Ok(int) => write!(f, "{}", int.get()),
                Err(_) => write!(f, "#<Integer:{addr:#x}>"),
            },
            TypeTag::String => match self.payload::<RString>() {
                Ok(string) => write!(f, "{:?}", string.as_str()),
                Err(_) => write!(f, "#<String:{addr:#x}>"),
            },
            TypeTag::Symbol => match self.payload::<RSymbol>() {
                Ok(symbol) => write!(f, ":{}", symbol.name()),
                Err(_) => write!(f, "#<Symbol:{addr:#x}>"),
            },
            TypeTag::Array => match self.payload::<RArray>() {
                Ok(array) => {
                    write!(f, "[")?;
                    for (i, item) in array.iter().enumerate() {
                        if i != 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, "]")
                }
                Err(_) => write!(f, "#<Array:{addr:#x}>"),
            },
            TypeTag::Hash => match self.payload::<RHash>() {
                Ok(hash) if hash.is_empty() => write!(f, "{{}}"),
                Ok(hash) => {
                    write!(f, "{{")?;
                    for (i, (key, value)) in hash.iter().enumerate() {
                        if i != 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{} => {}", key, value)?;
                    }
                    write!(f, "}}")
                }
                Err(_) => write!(f, "#<Hash:{addr:#x}>"),
            },
            TypeTag::Class => match self.payload::<RClass>() {
                Ok(class) => write!(f, "#<Class:{}>", class.name.get()),
                Err(_) => write!(f, "#<Class:{addr:#x}>"),
            },
            TypeTag::Module => match self.payload::<RModule>() {
                Ok(module) => write!(f, "#<Module:{}>", module.name.get()),
                Err(_) => write!(f, "#<Module:{addr:#x}>"),
            },
            tag => write!(f, "#<{}:{addr:#x}>", tag),
        }
    }
}

impl Display for Unpacked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unpacked::False => write!(f, "false"),
            Unpacked::Nil => write!(f, "nil"),
            Unpacked::True => write!(f, "true"),
            Unpacked::Undef => write!(f, "undef"),
            Unpacked::Fixnum(int) => write!(f, "{}", int),
            Unpacked::Flonum(float) => write!(f, "{}", float),
            Unpacked::Symbol(symbol) => write!(f, "{}", symbol),
            Unpacked::Heap(heap) => write!(f, "{}", heap),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.classify())
    }
}

impl Debug for HeapRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HeapRef({}: {:#x})", self.type_tag(), self.0 .0)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value({}: {:#018x})", self.type_of(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::alloc;

    #[test]
    fn test_immediates() {
        assert_eq!(Value::FALSE.to_string(), "false");
        assert_eq!(Value::NIL.to_string(), "nil");
        assert_eq!(Value::TRUE.to_string(), "true");
        assert_eq!(Value::UNDEF.to_string(), "undef");
        assert_eq!(Value::fixnum(-3).unwrap().to_string(), "-3");
        assert_eq!(Value::flonum(1.0).unwrap().to_string(), "1.0");
        assert_eq!(Value::flonum(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Value::static_symbol(SymbolId::new(7)).to_string(), "#<Symbol:7>");
    }

    #[test]
    fn test_heap() {
        let string = alloc(RString::new("abc"));
        let array = alloc(RArray::new(vec![Value::fixnum(42).unwrap(), string, Value::NIL]));
        assert_eq!(array.to_string(), "[42, \"abc\", nil]");

        assert_eq!(alloc(RFloat(f64::NEG_INFINITY)).to_string(), "-Infinity");
        assert_eq!(alloc(RSymbol::new("dyn")).to_string(), ":dyn");
        assert_eq!(alloc(RHash::new()).to_string(), "{}");
        assert_eq!(alloc(RModule::new(SymbolId::new(2))).to_string(), "#<Module:2>");
        assert_eq!(
            alloc(RClass::new(SymbolId::new(1), Value::NIL)).to_string(),
            "#<Class:1>"
        );
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Value::NIL), "Value(nil: 0x0000000000000004)");
        assert_eq!(
            format!("{:?}", Value::fixnum(1).unwrap()),
            "Value(Integer: 0x0000000000000003)"
        );
    }
}
