pub mod kube_config;
