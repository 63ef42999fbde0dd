#[macro_export]
macro_rules! gen_service_impl {
    (
        struct $service_name:ident : $trait:path = $dependencies:ident {
            $($field_name:ident: $field_type:path = $field_attr:ident),* $(,)?
        }
        $(; custom_fields {
            $($custom_name:ident: $custom_type:ty = $custom_attr:ident),* $(,)?
        })?
    ) => {
            pub trait $dependencies {
                type Transaction: dao::Transaction + Send + Sync + Clone + std::fmt::Debug + 'static;
                $(
                    type $field_name: $field_type + Sync + Send + 'static;
                )*
            }

            pub struct $service_name<Deps: $dependencies> {
                $(
                    pub $field_attr: std::sync::Arc<Deps::$field_name>,
                )*
                $($(
                    pub $custom_attr: $custom_type,
                )*)?
            }
    };
}
