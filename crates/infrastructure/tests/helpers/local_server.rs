use super::messages::{a_record, query_name, response_for};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// UDP server on 127.0.0.1 answering every query for `answer_name` with
/// `answer_ip`, and every other query with an empty NOERROR.
///
/// Started with [`LocalDnsServer::start_truncating`], every UDP reply is an
/// empty TC=1 response and the real answers come from a TCP listener on
/// the same port.
pub struct LocalDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl LocalDnsServer {
    pub async fn start(answer_name: &str, answer_ip: Ipv4Addr) -> Self {
        Self::spawn(answer_name, answer_ip, false).await
    }

    pub async fn start_truncating(answer_name: &str, answer_ip: Ipv4Addr) -> Self {
        Self::spawn(answer_name, answer_ip, true).await
    }

    async fn spawn(answer_name: &str, answer_ip: Ipv4Addr, truncate: bool) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let answer_name = answer_name.to_string();
        if truncate {
            let listener = TcpListener::bind(addr).await.unwrap();
            let answer_name = answer_name.clone();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        continue;
                    }
                    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                    if stream.read_exact(&mut query).await.is_err() {
                        continue;
                    }
                    let response = answer(&query, &answer_name, answer_ip);
                    let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                    let _ = stream.write_all(&response).await;
                }
            });
        }

        let counter = queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let query = &buf[..len];
                            let response = if truncate {
                                let mut response = response_for(query, Vec::new(), Vec::new());
                                response[2] |= 0x02;
                                response
                            } else {
                                answer(query, &answer_name, answer_ip)
                            };
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

fn answer(query: &[u8], answer_name: &str, answer_ip: Ipv4Addr) -> Vec<u8> {
    let answers = if query_name(query) == answer_name {
        vec![a_record(answer_name, answer_ip, 120)]
    } else {
        Vec::new()
    };
    response_for(query, answers, Vec::new())
}

impl Drop for LocalDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
