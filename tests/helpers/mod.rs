pub mod mock_notifiers;
