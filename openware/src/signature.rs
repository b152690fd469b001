// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Calling signatures of native exports.
//!
//! A symbol is bound with a concrete `unsafe extern "C" fn` type. The
//! [`NativeFn`] trait derives a runtime [`Signature`] descriptor from that type
//! and fixes the argument tuple, so arguments are checked against the declared
//! signature by the compiler at the binding site.

use std::{
    ffi::{c_char, c_int},
    fmt,
};

/// Scalar kinds that may cross the C boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// No value (`void`).
    Void,
    /// `int` / `int32_t`
    I32,
    /// `int64_t`
    I64,
    /// `uint32_t`
    U32,
    /// `uint64_t`
    U64,
    /// `float`
    F32,
    /// `double`
    F64,
    /// Borrowed NUL-terminated string (`const char*`).
    CString,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Void => "void",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::CString => "cstr",
        };
        f.write_str(name)
    }
}

/// Rust types with a C-compatible scalar representation.
pub trait NativeScalar: Copy {
    /// Kind reported in [`Signature`] descriptors.
    const KIND: ScalarKind;
}

macro_rules! impl_native_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl NativeScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;
            }
        )*
    };
}

impl_native_scalar! {
    () => Void,
    c_int => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    *const c_char => CString,
}

/// Ordered parameter kinds and the return kind of a native function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<ScalarKind>,
    ret: ScalarKind,
}

impl Signature {
    /// Creates a descriptor from parameter kinds in order and a return kind.
    pub fn new(params: Vec<ScalarKind>, ret: ScalarKind) -> Self {
        Self { params, ret }
    }

    /// Parameter kinds in declaration order.
    pub fn params(&self) -> &[ScalarKind] {
        &self.params
    }

    /// Return kind; [`ScalarKind::Void`] for none.
    pub fn ret(&self) -> ScalarKind {
        self.ret
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Function pointer types that can be bound to a native export.
///
/// Implemented for `unsafe extern "C" fn` with up to four [`NativeScalar`]
/// parameters.
pub trait NativeFn: Copy {
    /// Arguments as a tuple, in declaration order.
    type Args;
    /// Return type.
    type Output: NativeScalar;

    /// Runtime descriptor of this function type.
    fn signature() -> Signature;

    /// Calls the function.
    ///
    /// # Safety
    ///
    /// The pointer must refer to a function that really has this signature,
    /// and the callee must uphold its own contract for `args`.
    unsafe fn invoke(self, args: Self::Args) -> Self::Output;
}

macro_rules! impl_native_fn {
    ($($param:ident => $arg:ident),*) => {
        impl<R: NativeScalar, $($param: NativeScalar),*> NativeFn for unsafe extern "C" fn($($param),*) -> R {
            type Args = ($($param,)*);
            type Output = R;

            fn signature() -> Signature {
                Signature::new(vec![$($param::KIND),*], R::KIND)
            }

            unsafe fn invoke(self, args: Self::Args) -> R {
                let ($($arg,)*) = args;
                unsafe { (self)($($arg),*) }
            }
        }
    };
}

impl_native_fn!();
impl_native_fn!(A => a);
impl_native_fn!(A => a, B => b);
impl_native_fn!(A => a, B => b, C => c);
impl_native_fn!(A => a, B => b, C => c, D => d);
