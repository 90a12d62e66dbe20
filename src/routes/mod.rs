pub mod auth_routes;
pub mod center_routes;
pub mod employee_routes;
pub mod shift_routes;
pub mod work_center_routes;
pub mod work_schedule_routes;
