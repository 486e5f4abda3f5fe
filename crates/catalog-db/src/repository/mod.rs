//! # Repository Module
//!
//! Database access for catalog entities.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                 │
//! │       │  db.products().find_by_name("Hat").fetch_all()                  │
//! │       ▼                                                                 │
//! │  ProductStore                                                          │
//! │  ├── create / update / delete                                          │
//! │  ├── find / all / count                                                │
//! │  └── find_by_{name, availability, category, price} → ProductQuery      │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite (products table)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
