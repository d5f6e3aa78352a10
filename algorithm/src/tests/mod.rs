mod test_view_lock;
