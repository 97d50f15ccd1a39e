// Núcleo do back-office: livro-razão de estoque, montador de transações
// e projeção de demanda, com a camada HTTP fina por cima.
//
// O estoque em mãos nunca é armazenado: é sempre a soma dos movimentos
// do livro-razão. Toda operação de negócio escreve cabeçalho, itens e
// movimentações numa única transação.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
