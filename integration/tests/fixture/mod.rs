mod ephemeral_broker;
