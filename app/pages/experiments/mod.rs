pub mod _experiment_id;
