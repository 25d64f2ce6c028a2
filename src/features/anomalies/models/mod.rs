mod anomaly_list;

pub use anomaly_list::AnomalyList;
