mod anomaly_dto;

pub use anomaly_dto::{
    content_type_for_extension, photo_file_name, Anomaly, AnomalyDraft, AnomalyId, AnomalyStatus,
    AnomalySubmission, AssigneeDto, MachineRefDto, PhotoAttachment, PhotoPayload,
};
