//! Chapterhouse back end - integration test support.
//!
//! Re-exports the workspace crates so integration tests can build the same
//! router `main.rs` serves.

pub mod app {
    pub use chapterhouse_app::app::*;
}

pub mod component {
    pub use chapterhouse_service::*;

    pub mod db {
        pub use chapterhouse_db::db::*;

        pub mod connection {
            pub use chapterhouse_app::db_handler::DbProviderHandler;
            pub use chapterhouse_db::db::connection::*;
        }
    }

    pub mod model {
        pub use chapterhouse_db::model::*;
    }

    pub mod config {
        pub use chapterhouse_app::config::ConfigHandler;
        pub use chapterhouse_core::config::*;
    }
}
