pub mod application {
    #[cfg(test)]
    pub(crate) mod mocks;
    pub mod cart {
        pub mod add_item;
        pub mod checkout;
        pub mod clear;
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod remove_item;
        pub mod set_quantity;
        pub mod update_quantity;
    }
    pub mod product {
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod list;
        pub mod update;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_item;
            pub mod checkout;
            pub mod clear;
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod remove_item;
            pub mod set_quantity;
            pub mod update_quantity;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod events;
        pub mod model;
        pub mod query;
        pub mod repository;
        pub mod services;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod list;
            pub mod update;
        }
    }
}
