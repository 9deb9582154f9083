/// Implements the declaration builder methods for a column type. The
/// `ColumnOptions` live at `self.options` unless another field path is given.
macro_rules! column_builder {
    ($ty:ty) => {
        column_builder!($ty, options);
    };
    ($ty:ty, $($options:ident).+) => {
        impl $ty {
            /// Overrides the declared position.
            #[must_use]
            pub fn position(mut self, position: usize) -> Self {
                self.$($options).+.position = position;
                self
            }

            /// Stores the field under a different wire name.
            #[must_use]
            pub fn db_field(mut self, name: impl Into<String>) -> Self {
                self.$($options).+.db_field = Some(name.into());
                self
            }

            #[must_use]
            pub fn default_value(mut self, default: impl Into<$crate::DefaultValue>) -> Self {
                self.$($options).+.default = default.into();
                self
            }

            #[must_use]
            pub fn default_fn(
                mut self,
                f: impl Fn() -> cqlmodel_types::Value + Send + Sync + 'static,
            ) -> Self {
                self.$($options).+.default = $crate::DefaultValue::callable(f);
                self
            }

            #[must_use]
            pub fn required(mut self, required: bool) -> Self {
                self.$($options).+.required = required;
                self
            }
        }
    };
}
