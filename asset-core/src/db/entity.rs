//! [`Entity`] implementations tying each model to its insert payload.

use super::repository::Entity;
use crate::models::{
    Asset, AuditInfo, Category, Employee, MaintenanceRecord, MaintenanceStatus, NewAsset,
    NewCategory, NewEmployee, NewMaintenanceRecord, NewPurchaseOrder, NewRoom, NewTask, NewTenant,
    OrderStatus, PurchaseOrder, Room, Task, TaskStatus, Tenant,
};

impl Entity for Asset {
    type New = NewAsset;
    const KIND: &'static str = "asset";

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.tag)
    }

    fn from_new(
        id: i64,
        new: NewAsset,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            tag: new.tag,
            name: new.name,
            description: new.description,
            serial_number: new.serial_number,
            category_id: new.category_id,
            room_id: new.room_id,
            assigned_to: new.assigned_to,
            value: new.value,
            purchase_price: new.purchase_price,
            purchase_date: new.purchase_date,
            useful_life_years: new.useful_life_years,
            status: new.status,
            status_before_archive: None,
            audit,
        }
    }
}

impl Entity for Category {
    type New = NewCategory;
    const KIND: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn from_new(
        id: i64,
        new: NewCategory,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            default_useful_life_years: new.default_useful_life_years,
            archived: false,
            audit,
        }
    }
}

impl Entity for Room {
    type New = NewRoom;
    const KIND: &'static str = "room";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_new(
        id: i64,
        new: NewRoom,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            name: new.name,
            building: new.building,
            floor: new.floor,
            capacity: new.capacity,
            archived: false,
            audit,
        }
    }
}

impl Entity for Employee {
    type New = NewEmployee;
    const KIND: &'static str = "employee";

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn from_new(
        id: i64,
        new: NewEmployee,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            department: new.department,
            role: new.role,
            archived: false,
            audit,
        }
    }
}

impl Entity for MaintenanceRecord {
    type New = NewMaintenanceRecord;
    const KIND: &'static str = "maintenance record";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_new(
        id: i64,
        new: NewMaintenanceRecord,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            asset_id: new.asset_id,
            title: new.title,
            description: new.description,
            scheduled_date: new.scheduled_date,
            completed_date: None,
            cost: new.cost,
            technician: new.technician,
            status: MaintenanceStatus::Scheduled,
            archived: false,
            audit,
        }
    }
}

impl Entity for PurchaseOrder {
    type New = NewPurchaseOrder;
    const KIND: &'static str = "purchase order";

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.order_number)
    }

    fn from_new(
        id: i64,
        new: NewPurchaseOrder,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            order_number: new.order_number,
            supplier: new.supplier,
            item_name: new.item_name,
            category_id: new.category_id,
            quantity: new.quantity,
            unit_cost: new.unit_cost,
            order_date: new.order_date,
            expected_delivery: new.expected_delivery,
            useful_life_years: new.useful_life_years,
            asset_id: new.asset_id,
            status: OrderStatus::Pending,
            archived: false,
            audit,
        }
    }
}

impl Entity for Tenant {
    type New = NewTenant;
    const KIND: &'static str = "tenant";

    fn id(&self) -> i64 {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn from_new(
        id: i64,
        new: NewTenant,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            name: new.name,
            slug: new.slug,
            contact_email: new.contact_email,
            plan: new.plan,
            archived: false,
            audit,
        }
    }
}

impl Entity for Task {
    type New = NewTask;
    const KIND: &'static str = "task";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_new(
        id: i64,
        new: NewTask,
        audit: AuditInfo,
    ) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            assignee_id: new.assignee_id,
            asset_id: new.asset_id,
            due_date: new.due_date,
            status: TaskStatus::Todo,
            archived: false,
            audit,
        }
    }
}
