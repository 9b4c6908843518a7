mod asset;
mod audit;
mod category;
mod employee;
mod maintenance;
mod purchase_order;
mod room;
mod task;
mod tenant;

pub use asset::{Asset, AssetStatus, NewAsset};
pub use audit::AuditInfo;
pub use category::{Category, NewCategory};
pub use employee::{Employee, EmployeeRole, NewEmployee};
pub use maintenance::{MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord};
pub use purchase_order::{NewPurchaseOrder, OrderStatus, PurchaseOrder};
pub use room::{NewRoom, Room};
pub use task::{NewTask, Task, TaskStatus};
pub use tenant::{NewTenant, Tenant};
