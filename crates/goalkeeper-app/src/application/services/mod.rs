mod catalog_seeder;

pub use catalog_seeder::{seed_builtin_catalog, BuiltinCatalog, StarterKit};
