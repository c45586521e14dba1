//! Macro utilitaria para reducir boilerplate al definir acciones.
//!
//! Exportada en la raíz del crate:
//!   use act_core::define_action;

/// Declara una acción unitaria e implementa `ActionLogic`.
///
/// ```ignore
/// define_action! {
///     pub Multiply {
///         name: "multiply",
///         inputs: ["a: numeric", "b: numeric"],
///         cacheable: true,
///         perform(ctx, values) {
///             Ok(serde_json::json!(values.number("a")? * values.number("b")?))
///         }
///     }
/// }
/// ```
///
/// `cacheable` es opcional (por defecto `false`).
#[macro_export]
macro_rules! define_action {
    (
        $(#[$attr:meta])*
        $vis:vis $name:ident {
            name: $action_name:expr,
            inputs: [$($spec:expr),* $(,)?],
            $(cacheable: $cacheable:expr,)?
            perform($ctx:ident, $values:ident) $body:block
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $name;

        impl $name {
            pub fn new() -> Self { Self }
        }

        #[$crate::async_trait]
        impl $crate::action::ActionLogic for $name {
            fn name(&self) -> &str { $action_name }

            fn declare(&self, _decl: &mut $crate::action::ActionDeclaration<'_>) -> ::std::result::Result<(), $crate::errors::ActionError> {
                $( _decl.input($spec)?; )*
                Ok(())
            }

            fn is_cacheable(&self) -> bool { false $(|| $cacheable)? }

            async fn perform(&self,
                             $ctx: &$crate::action::ActionContext<'_>,
                             $values: &$crate::action::InputValues<'_>)
                             -> ::std::result::Result<$crate::serde_json::Value, $crate::errors::ActionError> {
                $body
            }
        }
    };
}
