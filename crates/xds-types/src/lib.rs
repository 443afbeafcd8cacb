//! # xds-types
//!
//! Protobuf message types for the subset of the Envoy v3 xDS API that the
//! mesh client consumes.
//!
//! The messages are declared with `prost` derives and carry the same field
//! tags as the upstream `.proto` files, so bytes produced by any conforming
//! control plane decode into them. Fields the client does not read are
//! left out; `prost` skips unknown fields while decoding.
//!
//! Included:
//!
//! - `envoy.config.core.v3`: `Node`, `Locality`, `Address`, `SocketAddress`,
//!   `Metadata`, `HealthStatus`
//! - `envoy.config.cluster.v3`: `Cluster` with discovery type, LB policy and
//!   EDS config
//! - `envoy.config.endpoint.v3`: `ClusterLoadAssignment` and nested types

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)] // Mirrors proto definitions
#![allow(clippy::derive_partial_eq_without_eq)]

// Re-export prost types for convenience
pub use prost::Message;
pub use prost_types::Any;

pub mod envoy {
    //! Envoy xDS types.

    pub mod config {
        //! Envoy configuration types.

        pub mod core {
            //! Core configuration types.

            pub mod v3 {
                //! Core v3 API.

                /// Identifies a specific client instance to the control plane.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Node {
                    /// Opaque node identifier.
                    #[prost(string, tag = "1")]
                    pub id: ::prost::alloc::string::String,
                    /// Local service cluster name.
                    #[prost(string, tag = "2")]
                    pub cluster: ::prost::alloc::string::String,
                    /// Opaque metadata extending the node identifier.
                    #[prost(message, optional, tag = "3")]
                    pub metadata: ::core::option::Option<::prost_types::Struct>,
                    /// Locality specifying where the node is running.
                    #[prost(message, optional, tag = "4")]
                    pub locality: ::core::option::Option<Locality>,
                    /// Free-form string identifying the client type.
                    #[prost(string, tag = "6")]
                    pub user_agent_name: ::prost::alloc::string::String,
                    /// Well known features the client supports.
                    #[prost(string, repeated, tag = "10")]
                    pub client_features: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
                    /// Version of the client named by `user_agent_name`.
                    #[prost(oneof = "node::UserAgentVersionType", tags = "7")]
                    pub user_agent_version_type: ::core::option::Option<node::UserAgentVersionType>,
                }

                /// Nested types of [`Node`].
                pub mod node {
                    /// Version of the client named by `user_agent_name`.
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum UserAgentVersionType {
                        /// Free-form version string.
                        #[prost(string, tag = "7")]
                        UserAgentVersion(::prost::alloc::string::String),
                    }
                }

                /// Identifies location of where either Envoy runs or where upstream hosts run.
                #[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
                pub struct Locality {
                    #[prost(string, tag = "1")]
                    pub region: ::prost::alloc::string::String,
                    #[prost(string, tag = "2")]
                    pub zone: ::prost::alloc::string::String,
                    #[prost(string, tag = "3")]
                    pub sub_zone: ::prost::alloc::string::String,
                }

                /// Metadata keyed by filter name.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Metadata {
                    #[prost(map = "string, message", tag = "1")]
                    pub filter_metadata: ::std::collections::HashMap<
                        ::prost::alloc::string::String,
                        ::prost_types::Struct,
                    >,
                }

                /// Network address.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Address {
                    #[prost(oneof = "address::Address", tags = "1, 2, 3")]
                    pub address: ::core::option::Option<address::Address>,
                }

                /// Nested message and enum types in `Address`.
                pub mod address {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum Address {
                        #[prost(message, tag = "1")]
                        SocketAddress(super::SocketAddress),
                        #[prost(message, tag = "2")]
                        Pipe(super::Pipe),
                        #[prost(message, tag = "3")]
                        EnvoyInternalAddress(super::EnvoyInternalAddress),
                    }
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct SocketAddress {
                    #[prost(enumeration = "socket_address::Protocol", tag = "1")]
                    pub protocol: i32,
                    #[prost(string, tag = "2")]
                    pub address: ::prost::alloc::string::String,
                    #[prost(string, tag = "5")]
                    pub resolver_name: ::prost::alloc::string::String,
                    #[prost(bool, tag = "6")]
                    pub ipv4_compat: bool,
                    #[prost(oneof = "socket_address::PortSpecifier", tags = "3, 4")]
                    pub port_specifier: ::core::option::Option<socket_address::PortSpecifier>,
                }

                /// Nested message and enum types in `SocketAddress`.
                pub mod socket_address {
                    #[derive(
                        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
                    )]
                    #[repr(i32)]
                    pub enum Protocol {
                        Tcp = 0,
                        Udp = 1,
                    }

                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum PortSpecifier {
                        #[prost(uint32, tag = "3")]
                        PortValue(u32),
                        #[prost(string, tag = "4")]
                        NamedPort(::prost::alloc::string::String),
                    }
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Pipe {
                    #[prost(string, tag = "1")]
                    pub path: ::prost::alloc::string::String,
                    #[prost(uint32, tag = "2")]
                    pub mode: u32,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct EnvoyInternalAddress {
                    #[prost(string, tag = "2")]
                    pub endpoint_id: ::prost::alloc::string::String,
                    #[prost(string, tag = "1")]
                    pub server_listener_name: ::prost::alloc::string::String,
                }

                /// Endpoint health status.
                #[derive(
                    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
                )]
                #[repr(i32)]
                pub enum HealthStatus {
                    Unknown = 0,
                    Healthy = 1,
                    Unhealthy = 2,
                    Draining = 3,
                    Timeout = 4,
                    Degraded = 5,
                }
            }
        }

        pub mod cluster {
            //! Cluster configuration.

            pub mod v3 {
                //! Cluster v3 API.

                /// Configuration for a single upstream cluster.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Cluster {
                    /// Cluster name, unique across all clusters.
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    /// Configuration to use for EDS updates.
                    #[prost(message, optional, tag = "3")]
                    pub eds_cluster_config: ::core::option::Option<cluster::EdsClusterConfig>,
                    /// Load balancer type.
                    #[prost(enumeration = "cluster::LbPolicy", tag = "6")]
                    pub lb_policy: i32,
                    /// Name used in stats instead of the cluster name.
                    #[prost(string, tag = "28")]
                    pub alt_stat_name: ::prost::alloc::string::String,
                    /// Endpoints embedded directly in the cluster.
                    #[prost(message, optional, tag = "33")]
                    pub load_assignment:
                        ::core::option::Option<super::super::endpoint::v3::ClusterLoadAssignment>,
                    #[prost(oneof = "cluster::ClusterDiscoveryType", tags = "2, 38")]
                    pub cluster_discovery_type: ::core::option::Option<cluster::ClusterDiscoveryType>,
                }

                /// Nested message and enum types in `Cluster`.
                pub mod cluster {
                    /// Service discovery type for the cluster.
                    #[derive(
                        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
                    )]
                    #[repr(i32)]
                    pub enum DiscoveryType {
                        Static = 0,
                        StrictDns = 1,
                        LogicalDns = 2,
                        Eds = 3,
                        OriginalDst = 4,
                    }

                    /// Load balancing policy.
                    #[derive(
                        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
                    )]
                    #[repr(i32)]
                    pub enum LbPolicy {
                        RoundRobin = 0,
                        LeastRequest = 1,
                        RingHash = 2,
                        Random = 3,
                        Maglev = 5,
                        ClusterProvided = 6,
                        LoadBalancingPolicyConfig = 7,
                    }

                    /// Extension-provided cluster type.
                    #[derive(Clone, PartialEq, ::prost::Message)]
                    pub struct CustomClusterType {
                        #[prost(string, tag = "1")]
                        pub name: ::prost::alloc::string::String,
                        #[prost(message, optional, tag = "2")]
                        pub typed_config: ::core::option::Option<::prost_types::Any>,
                    }

                    /// EDS settings of a cluster.
                    #[derive(Clone, PartialEq, ::prost::Message)]
                    pub struct EdsClusterConfig {
                        /// Alternative name to request endpoints under.
                        #[prost(string, tag = "2")]
                        pub service_name: ::prost::alloc::string::String,
                    }

                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ClusterDiscoveryType {
                        #[prost(enumeration = "DiscoveryType", tag = "2")]
                        Type(i32),
                        #[prost(message, tag = "38")]
                        ClusterType(CustomClusterType),
                    }
                }
            }
        }

        pub mod endpoint {
            //! Endpoint configuration.

            pub mod v3 {
                //! Endpoint v3 API.

                /// Endpoints of a cluster grouped by locality.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct ClusterLoadAssignment {
                    #[prost(string, tag = "1")]
                    pub cluster_name: ::prost::alloc::string::String,
                    #[prost(message, repeated, tag = "2")]
                    pub endpoints: ::prost::alloc::vec::Vec<LocalityLbEndpoints>,
                }

                /// A group of endpoints belonging to a locality.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct LocalityLbEndpoints {
                    #[prost(message, optional, tag = "1")]
                    pub locality: ::core::option::Option<super::super::core::v3::Locality>,
                    #[prost(message, repeated, tag = "2")]
                    pub lb_endpoints: ::prost::alloc::vec::Vec<LbEndpoint>,
                    #[prost(message, optional, tag = "3")]
                    pub load_balancing_weight: ::core::option::Option<u32>,
                    #[prost(uint32, tag = "5")]
                    pub priority: u32,
                }

                /// An endpoint that traffic can be routed to.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct LbEndpoint {
                    #[prost(enumeration = "super::super::core::v3::HealthStatus", tag = "2")]
                    pub health_status: i32,
                    #[prost(message, optional, tag = "3")]
                    pub metadata: ::core::option::Option<super::super::core::v3::Metadata>,
                    #[prost(message, optional, tag = "4")]
                    pub load_balancing_weight: ::core::option::Option<u32>,
                    #[prost(oneof = "lb_endpoint::HostIdentifier", tags = "1, 5")]
                    pub host_identifier: ::core::option::Option<lb_endpoint::HostIdentifier>,
                }

                /// Nested message and enum types in `LbEndpoint`.
                pub mod lb_endpoint {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum HostIdentifier {
                        #[prost(message, tag = "1")]
                        Endpoint(super::Endpoint),
                        #[prost(string, tag = "5")]
                        EndpointName(::prost::alloc::string::String),
                    }
                }

                /// Upstream host identifier.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Endpoint {
                    #[prost(message, optional, tag = "1")]
                    pub address: ::core::option::Option<super::super::core::v3::Address>,
                    #[prost(string, tag = "3")]
                    pub hostname: ::prost::alloc::string::String,
                }
            }
        }
    }
}
