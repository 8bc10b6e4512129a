use crate::{
    alias::PackageAliasTable,
    error::EmitError,
    plan::{Conversion, ConversionPlan, FieldOperation},
};
use convgen_schema::types::{TypeKey, TypeRef};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Ident, Path, Type};
use tracing::debug;

///
/// EmitOptions
/// Paths the emitted signatures refer to.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmitOptions {
    /// Trait the `scope` argument is a `&mut dyn` of.
    pub scope_type: String,

    /// Error type of the generated `Result`.
    pub error_type: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            scope_type: "Scope".to_string(),
            error_type: "ConversionError".to_string(),
        }
    }
}

///
/// GeneratedFunction
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFunction {
    pub name: String,
    pub source: String,

    /// Position in the generator's accumulated output.
    pub order: usize,
}

///
/// CodeEmitter
///
/// Renders complete plans as formatted Rust. The text is a pure function of
/// the plan, the alias table and the options.
///

#[derive(Clone, Copy, Debug)]
pub struct CodeEmitter<'a> {
    aliases: &'a PackageAliasTable,
    options: &'a EmitOptions,
}

impl<'a> CodeEmitter<'a> {
    #[must_use]
    pub const fn new(aliases: &'a PackageAliasTable, options: &'a EmitOptions) -> Self {
        Self { aliases, options }
    }

    pub fn emit(&self, plan: &ConversionPlan, order: usize) -> Result<GeneratedFunction, EmitError> {
        let name = plan.function_name();
        if let Some((field, _)) = plan.skipped().next() {
            return Err(EmitError::Incomplete {
                function: name,
                field: field.to_string(),
            });
        }

        let tokens = self.function_tokens(&name, plan)?;
        let file = syn::parse2::<syn::File>(tokens).map_err(|error| EmitError::Tokens {
            function: name.clone(),
            error,
        })?;
        let source = prettyplease::unparse(&file);
        debug!(function = %name, order, "emitted");

        Ok(GeneratedFunction {
            name,
            source,
            order,
        })
    }

    fn function_tokens(&self, name: &str, plan: &ConversionPlan) -> Result<TokenStream, EmitError> {
        let ident = parse_ident(name)?;
        let src_ty = self.named_type(plan.source())?;
        let dst_ty = self.named_type(plan.destination())?;
        let scope = parse_path(&self.options.scope_type)?;
        let error = parse_type(&self.options.error_type)?;

        let stmts = plan
            .operations()
            .iter()
            .map(|op| self.statement(name, op, &error))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quote! {
            #[allow(non_snake_case, unused_variables)]
            pub fn #ident(
                src: &#src_ty,
                dst: &mut #dst_ty,
                scope: &mut dyn #scope,
            ) -> Result<(), #error> {
                #(#stmts)*
                Ok(())
            }
        })
    }

    fn statement(
        &self,
        name: &str,
        op: &FieldOperation,
        error: &Type,
    ) -> Result<TokenStream, EmitError> {
        let field = parse_ident(op.field())?;

        let stmt = match op {
            FieldOperation::DirectAssign { copy: true, .. } => quote!(dst.#field = src.#field;),
            FieldOperation::DirectAssign { copy: false, .. } => {
                quote!(dst.#field = src.#field.clone();)
            }
            FieldOperation::ManualDelegate { function, .. }
            | FieldOperation::RecursiveCall {
                function,
                conversion: Conversion::Call { .. },
                ..
            } => {
                let path = parse_path(function)?;
                quote!(#path(&src.#field, &mut dst.#field, scope)?;)
            }
            FieldOperation::RecursiveCall { conversion, .. } => {
                let expr = self.expr(conversion, &Input::Field(&field), error)?;
                quote!(dst.#field = #expr;)
            }
            FieldOperation::Skip { .. } => {
                return Err(EmitError::Incomplete {
                    function: name.to_string(),
                    field: op.field().to_string(),
                });
            }
        };

        Ok(stmt)
    }

    // Expression producing the converted value of `input`.
    fn expr(
        &self,
        conversion: &Conversion,
        input: &Input<'_>,
        error: &Type,
    ) -> Result<TokenStream, EmitError> {
        let receiver = input.receiver();

        let expr = match conversion {
            Conversion::Call { function, to, .. } => {
                let path = parse_path(function)?;
                let ty = self.rust_type(to)?;
                let arg = input.reference();
                quote! {
                    {
                        let mut out: #ty = Default::default();
                        #path(#arg, &mut out, scope)?;
                        out
                    }
                }
            }
            Conversion::Option(inner) => {
                let inner = self.expr(inner, &Input::Value, error)?;
                quote! {
                    match #receiver.as_deref() {
                        Some(value) => Some(Box::new(#inner)),
                        None => None,
                    }
                }
            }
            Conversion::List(inner) => {
                let inner = self.expr(inner, &Input::Value, error)?;
                quote! {
                    #receiver
                        .iter()
                        .map(|value| -> Result<_, #error> { Ok(#inner) })
                        .collect::<Result<Vec<_>, #error>>()?
                }
            }
            Conversion::Map(inner) => {
                let inner = self.expr(inner, &Input::Value, error)?;
                quote! {
                    #receiver
                        .iter()
                        .map(|(key, value)| -> Result<_, #error> { Ok((key.clone(), #inner)) })
                        .collect::<Result<::std::collections::BTreeMap<_, _>, #error>>()?
                }
            }
        };

        Ok(expr)
    }

    /// Rust type of a field declaration, with composites qualified through
    /// the alias table.
    pub fn rust_type(&self, ty: &TypeRef) -> Result<TokenStream, EmitError> {
        let tokens = match ty {
            TypeRef::Primitive(p) => p.as_type(),
            TypeRef::Named(key) => self.named_type(key)?.into_token_stream(),
            TypeRef::Pointer(inner) => {
                let inner = self.rust_type(inner)?;
                quote!(Option<Box<#inner>>)
            }
            TypeRef::Slice(inner) => {
                let inner = self.rust_type(inner)?;
                quote!(Vec<#inner>)
            }
            TypeRef::Map { key, value } => {
                let key = self.rust_type(key)?;
                let value = self.rust_type(value)?;
                quote!(::std::collections::BTreeMap<#key, #value>)
            }
        };

        Ok(tokens)
    }

    fn named_type(&self, key: &TypeKey) -> Result<Type, EmitError> {
        let path = match self.aliases.qualifier(&key.version) {
            Some(module) => format!("{module}::{}", key.name),
            None => key.name.clone(),
        };

        parse_type(&path)
    }
}

// Where the value being converted comes from: a field of `src`, or the
// `value` binding of an enclosing match arm or closure (already a reference).
enum Input<'a> {
    Field(&'a Ident),
    Value,
}

impl Input<'_> {
    fn receiver(&self) -> TokenStream {
        match self {
            Self::Field(field) => quote!(src.#field),
            Self::Value => quote!(value),
        }
    }

    fn reference(&self) -> TokenStream {
        match self {
            Self::Field(field) => quote!(&src.#field),
            Self::Value => quote!(value),
        }
    }
}

fn parse_ident(ident: &str) -> Result<Ident, EmitError> {
    syn::parse_str(ident).map_err(|error| EmitError::InvalidPath {
        path: ident.to_string(),
        error,
    })
}

fn parse_path(path: &str) -> Result<Path, EmitError> {
    syn::parse_str(path).map_err(|error| EmitError::InvalidPath {
        path: path.to_string(),
        error,
    })
}

fn parse_type(ty: &str) -> Result<Type, EmitError> {
    syn::parse_str(ty).map_err(|error| EmitError::InvalidType {
        ty: ty.to_string(),
        error,
    })
}
