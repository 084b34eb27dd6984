use flowbar_config::{MqClientSettings, MqConnection};

use crate::property::{PropertyRule, flag, non_blank, present, unless};

/// Connection properties shared by MQ input and output nodes, in emission order.
pub(super) const CLIENT_RULES: &[PropertyRule<MqClientSettings>] = &[
  PropertyRule {
    name: "connection",
    value: |c| unless(c.connection, MqConnection::Local),
  },
  PropertyRule {
    name: "destinationQueueManagerName",
    value: |c| non_blank(&c.destination_queue_manager_name),
  },
  PropertyRule {
    name: "queueManagerHostname",
    value: |c| non_blank(&c.queue_manager_host_name),
  },
  PropertyRule {
    name: "listenerPortNumber",
    value: |c| present(c.listener_port_number),
  },
  PropertyRule {
    name: "channelName",
    value: |c| non_blank(&c.channel_name),
  },
  PropertyRule {
    name: "securityIdentity",
    value: |c| non_blank(&c.security_identity),
  },
  PropertyRule {
    name: "useSSL",
    value: |c| flag(c.use_ssl),
  },
  PropertyRule {
    name: "SSLPeerName",
    value: |c| non_blank(&c.ssl_peer_name),
  },
  PropertyRule {
    name: "SSLCipherSpec",
    value: |c| non_blank(&c.ssl_cipher_spec),
  },
];
