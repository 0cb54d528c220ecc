//! Category catalog with a managed lifecycle.
//!
//! Names and descriptions are stored trimmed and uppercased. A name is unique
//! among non-deleted categories; deletion is soft and terminal.
//!
//! ## Lifecycle
//!
//! ```text
//! ACTIVE <--> INACTIVE
//!    \          /
//!     v        v
//!      DELETED
//! ```
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/categories` | Create category |
//! | GET | `/api/categories` | Paged listing with filters |
//! | GET | `/api/categories/search?name=` | Partial-name search |
//! | GET | `/api/categories/name/{name}` | Get by exact name |
//! | GET | `/api/categories/status/{status}` | List by status |
//! | GET | `/api/categories/{id}` | Get by ID |
//! | PATCH | `/api/categories/{id}` | Partial update |
//! | DELETE | `/api/categories/{id}` | Soft delete |
//! | PATCH | `/api/categories/{id}/disable` | ACTIVE to INACTIVE |
//! | PATCH | `/api/categories/{id}/enable` | INACTIVE to ACTIVE |

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod validator;

pub use repositories::PgCategoryRepository;
pub use services::CategoryService;
