use kube::Config;

pub trait KubeConfigExt {
    fn get_cluster_name(&self) -> String;
}

impl KubeConfigExt for Config {
    fn get_cluster_name(&self) -> String {
        match self.cluster_url.authority() {
            Some(authority) => authority.as_str().replace(['.', ':'], "_"),
            None => "default".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_name_from_url() {
        let config = Config::new("https://api.example.com:6443".parse().unwrap());
        assert_eq!(config.get_cluster_name(), "api_example_com_6443");
    }
}
