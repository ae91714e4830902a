pub use tonic;

pub mod hello_world {
    // 生成ファイル: helloworld.rs
    tonic::include_proto!("helloworld");
}
