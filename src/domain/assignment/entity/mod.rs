pub mod teacher_department;
