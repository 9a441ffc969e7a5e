pub mod k8s_backend;
