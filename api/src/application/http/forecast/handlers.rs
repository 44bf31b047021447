pub mod predict_demand;
