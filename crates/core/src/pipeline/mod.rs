pub mod reading_feedback_use_case;
