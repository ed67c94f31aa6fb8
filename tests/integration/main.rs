mod test_detection_client;
