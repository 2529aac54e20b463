//! Controllers collected by the `demo_app::controllers` package scan.

mod dept;
mod emp;
