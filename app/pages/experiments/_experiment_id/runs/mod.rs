pub mod _run_id;
