mod test_frame_basic;
mod test_tessellation_basic;
