use crate::image::loader::MAX_IMAGE_BYTES;
use crate::utils::error::RockError;
use crate::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器绑定地址
    pub bind_addr: String,

    /// 预训练模型文件路径
    pub model_path: PathBuf,

    /// 开发模式
    pub dev_mode: bool,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,

    /// 服务器配置
    pub server_config: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,

    /// 优化级别
    pub optimization_level: i32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 请求超时时间（秒）
    pub request_timeout: u64,

    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

impl Config {
    pub fn new(
        bind_addr: String,
        model_path: String,
        intra_threads: Option<usize>,
        dev_mode: bool,
    ) -> Result<Self> {
        if model_path.trim().is_empty() {
            return Err(RockError::Config("Model path must not be empty".to_string()));
        }

        let cpu_cores = num_cpus::get();

        let onnx_config = OnnxConfig {
            intra_threads: intra_threads.unwrap_or((cpu_cores * 3 / 4).max(1)),
            optimization_level: 3,
        };

        let server_config = ServerConfig {
            request_timeout: if dev_mode { 300 } else { 60 },
            // multipart边界和表单字段留出余量
            max_request_size: MAX_IMAGE_BYTES + 1024 * 1024,
        };

        Ok(Self {
            bind_addr,
            model_path: PathBuf::from(model_path),
            dev_mode,
            onnx_config,
            server_config,
        })
    }

    /// 获取分类模型路径
    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }
}
