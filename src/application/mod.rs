pub mod plate_workflow;
