use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::GenericImage;

pub struct RedisTestContainer {
	pub client:    redis::Client,
	pub container: testcontainers::ContainerAsync<GenericImage>,
}

pub async fn setup_redis_container() -> RedisTestContainer {
	let container = GenericImage::new("redis", "8.0.3-alpine")
		.with_exposed_port(ContainerPort::Tcp(6379))
		.with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
		.start()
		.await
		.unwrap();

	let host_port = container.get_host_port_ipv4(6379).await.unwrap();
	let redis_url = format!("redis://127.0.0.1:{host_port}");
	let client = redis::Client::open(redis_url).expect("Invalid Redis URL");

	RedisTestContainer { client, container }
}
