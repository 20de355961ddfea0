mod test_app;
