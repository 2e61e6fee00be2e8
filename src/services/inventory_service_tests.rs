// src/services/inventory_service_tests.rs
//
// UNIT TESTS: Inventory State Store consistency
//
// PURPOSE:
// - Prove local preconditions fail before any network call
// - Prove failed operations leave every collection untouched
// - Prove stock-affecting writes defer to the server-confirmed reload

#[cfg(test)]
mod consistency_tests {
    use crate::domain::ferragem::Ferragem;
    use crate::domain::movimentacao::{Movimentacao, TipoMovimentacao};
    use crate::domain::projeto::{Projeto, StatusProjeto};
    use crate::domain::DomainError;
    use crate::error::AppError;
    use crate::remote::{MockInventarioRemoto, NovaFerragem, NovoProjeto};
    use crate::services::{AtualizaProjeto, InventoryService};
    use chrono::{NaiveDate, Utc};
    use mockall::Sequence;
    use std::sync::Arc;

    fn ferragem(id: &str, tipo: &str, marca: &str, quantidade: u32) -> Ferragem {
        Ferragem::new(
            id.to_string(),
            tipo.to_string(),
            marca.to_string(),
            quantidade,
            "Ferragens".to_string(),
        )
    }

    fn retirada(id: &str, ferragem: Ferragem, quantidade: u32, cliente: &str) -> Movimentacao {
        Movimentacao {
            id: id.to_string(),
            ferragem_id: ferragem.id.clone(),
            ferragem,
            tipo: TipoMovimentacao::Saida,
            quantidade,
            cliente: cliente.to_string(),
            responsavel: "Carlos Santos".to_string(),
            data: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            motivo: None,
        }
    }

    fn projeto(id: &str, cliente: &str) -> Projeto {
        let agora = Utc::now();
        Projeto {
            id: id.to_string(),
            nome_cliente: cliente.to_string(),
            marceneiro_responsavel: "Carlos Santos".to_string(),
            status: StatusProjeto::EmAndamento,
            valor: 2500.0,
            materiais_usados: Vec::new(),
            criado_em: agora,
            atualizado_em: agora,
        }
    }

    /// Mock whose three list endpoints return the given snapshots once
    fn mock_com_snapshot(
        ferragens: Vec<Ferragem>,
        movimentacoes: Vec<Movimentacao>,
        projetos: Vec<Projeto>,
    ) -> MockInventarioRemoto {
        let mut mock = MockInventarioRemoto::new();
        mock.expect_list_ferragens()
            .times(1)
            .returning(move || Ok(ferragens.clone()));
        mock.expect_list_movimentacoes()
            .times(1)
            .returning(move || Ok(movimentacoes.clone()));
        mock.expect_list_projetos()
            .times(1)
            .returning(move || Ok(projetos.clone()));
        mock
    }

    #[tokio::test]
    async fn test_load_all_replaces_collections_and_derives_materials() {
        let dobradica = ferragem("1", "Dobradiça", "Hafele", 2);
        let movimentacoes = vec![
            retirada("1", dobradica.clone(), 4, "João Silva"),
            retirada("2", dobradica.clone(), 2, "João Silva"),
        ];
        let mock = mock_com_snapshot(
            vec![dobradica],
            movimentacoes,
            vec![projeto("1", "João Silva")],
        );

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        assert_eq!(service.ferragens().len(), 1);
        assert_eq!(service.movimentacoes().len(), 2);
        // materials derived from history, grouped by (tipo, marca)
        let materiais = &service.projetos()[0].materiais_usados;
        assert_eq!(materiais.len(), 1);
        assert_eq!(materiais[0].quantidade, 6);
    }

    #[tokio::test]
    async fn test_load_all_failure_keeps_prior_state() {
        let mut mock = MockInventarioRemoto::new();
        let mut seq = Sequence::new();
        mock.expect_list_ferragens()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![ferragem("1", "Dobradiça", "Hafele", 2)]));
        mock.expect_list_ferragens()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(AppError::Remote("connection refused".to_string())));
        mock.expect_list_movimentacoes().returning(|| Ok(Vec::new()));
        mock.expect_list_projetos().returning(|| Ok(Vec::new()));

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service.load_all().await.unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
        // prior snapshot intact
        assert_eq!(service.ferragens().len(), 1);
        assert_eq!(service.ferragens()[0].quantidade, 2);
    }

    #[tokio::test]
    async fn test_withdrawal_exceeding_stock_rejected_before_network() {
        let mut mock = mock_com_snapshot(
            vec![ferragem("1", "Dobradiça", "Hafele", 2)],
            Vec::new(),
            Vec::new(),
        );
        mock.expect_create_movimentacao().never();

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .record_withdrawal(
                "1",
                4,
                "João Silva",
                "Carlos Santos",
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Domain(DomainError::EstoqueInsuficiente {
                solicitado: 4,
                disponivel: 2,
            })
        ));
        // no side effects
        assert_eq!(service.ferragens()[0].quantidade, 2);
        assert!(service.movimentacoes().is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_unknown_ferragem_is_not_found() {
        let mut mock = mock_com_snapshot(Vec::new(), Vec::new(), Vec::new());
        mock.expect_create_movimentacao().never();

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .record_withdrawal(
                "99",
                1,
                "João Silva",
                "Carlos Santos",
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_withdrawal_zero_quantity_is_invalid_input() {
        let mut mock = mock_com_snapshot(
            vec![ferragem("1", "Dobradiça", "Hafele", 2)],
            Vec::new(),
            Vec::new(),
        );
        mock.expect_create_movimentacao().never();

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .record_withdrawal(
                "1",
                0,
                "João Silva",
                "Carlos Santos",
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::QuantidadeInvalida(0))
        ));
    }

    #[tokio::test]
    async fn test_confirmed_withdrawal_reloads_server_stock() {
        let corredica = ferragem("2", "Corrediça", "Blum", 8);
        let confirmada = retirada("10", corredica.clone(), 2, "Maria Oliveira");

        let mut mock = MockInventarioRemoto::new();
        let mut ferragens_seq = Sequence::new();
        let mut movimentacoes_seq = Sequence::new();

        // initial load
        {
            let corredica = corredica.clone();
            mock.expect_list_ferragens()
                .times(1)
                .in_sequence(&mut ferragens_seq)
                .returning(move || Ok(vec![corredica.clone()]));
        }
        mock.expect_list_movimentacoes()
            .times(1)
            .in_sequence(&mut movimentacoes_seq)
            .returning(|| Ok(Vec::new()));
        mock.expect_list_projetos().times(1).returning(|| Ok(Vec::new()));

        // the write itself
        {
            let confirmada = confirmada.clone();
            mock.expect_create_movimentacao()
                .times(1)
                .withf(|nova| {
                    nova.ferragem_id == "2"
                        && nova.tipo == TipoMovimentacao::Saida
                        && nova.quantidade == 2
                })
                .returning(move |_| Ok(confirmada.clone()));
        }

        // reload-after-write: server is authoritative for resulting stock
        mock.expect_list_ferragens()
            .times(1)
            .in_sequence(&mut ferragens_seq)
            .returning(|| Ok(vec![ferragem("2", "Corrediça", "Blum", 6)]));
        {
            let confirmada = confirmada.clone();
            mock.expect_list_movimentacoes()
                .times(1)
                .in_sequence(&mut movimentacoes_seq)
                .returning(move || Ok(vec![confirmada.clone()]));
        }

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        service
            .record_withdrawal(
                "2",
                2,
                "Maria Oliveira",
                "Pedro Lima",
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(service.ferragens()[0].quantidade, 6);
        assert_eq!(service.movimentacoes().len(), 1);
        assert_eq!(service.movimentacoes()[0].quantidade, 2);
    }

    #[tokio::test]
    async fn test_entry_increases_stock_via_reload() {
        let parafuso = ferragem("5", "Parafuso", "Wurth", 50);
        let entrada = Movimentacao {
            tipo: TipoMovimentacao::Entrada,
            cliente: String::new(),
            ..retirada("11", parafuso.clone(), 100, "")
        };

        let mut mock = MockInventarioRemoto::new();
        let mut ferragens_seq = Sequence::new();
        {
            let parafuso = parafuso.clone();
            mock.expect_list_ferragens()
                .times(1)
                .in_sequence(&mut ferragens_seq)
                .returning(move || Ok(vec![parafuso.clone()]));
        }
        mock.expect_list_projetos().times(1).returning(|| Ok(Vec::new()));
        {
            let entrada = entrada.clone();
            mock.expect_create_movimentacao()
                .times(1)
                .withf(|nova| nova.tipo == TipoMovimentacao::Entrada && nova.quantidade == 100)
                .returning(move |_| Ok(entrada.clone()));
        }
        mock.expect_list_ferragens()
            .times(1)
            .in_sequence(&mut ferragens_seq)
            .returning(|| Ok(vec![ferragem("5", "Parafuso", "Wurth", 150)]));
        {
            let entrada = entrada.clone();
            let mut chamadas = 0;
            mock.expect_list_movimentacoes().times(2).returning(move || {
                chamadas += 1;
                if chamadas == 1 {
                    Ok(Vec::new())
                } else {
                    Ok(vec![entrada.clone()])
                }
            });
        }

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        service
            .record_entry("5", 100, Some("Reposição de estoque".to_string()))
            .await
            .unwrap();

        assert_eq!(service.ferragens()[0].quantidade, 150);
        assert_eq!(service.movimentacoes().len(), 1);
    }

    #[tokio::test]
    async fn test_add_ferragem_appends_confirmed_record() {
        let mut mock = mock_com_snapshot(Vec::new(), Vec::new(), Vec::new());
        mock.expect_create_ferragem()
            .times(1)
            .returning(|nova| {
                Ok(Ferragem::new(
                    "7".to_string(),
                    nova.tipo,
                    nova.marca,
                    nova.quantidade,
                    nova.categoria,
                ))
            });

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let criada = service
            .add_ferragem(NovaFerragem {
                tipo: "Fechadura".to_string(),
                marca: "Stam".to_string(),
                quantidade: 15,
                categoria: "Ferragens".to_string(),
            })
            .await
            .unwrap();

        // server-confirmed id, not a locally generated one
        assert_eq!(criada.id, "7");
        assert_eq!(service.ferragens().len(), 1);
    }

    #[tokio::test]
    async fn test_add_ferragem_remote_failure_changes_nothing() {
        let mut mock = mock_com_snapshot(Vec::new(), Vec::new(), Vec::new());
        mock.expect_create_ferragem()
            .times(1)
            .returning(|_| Err(AppError::Remote("validation failed".to_string())));

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .add_ferragem(NovaFerragem {
                tipo: "Fechadura".to_string(),
                marca: "Stam".to_string(),
                quantidade: 15,
                categoria: "Ferragens".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Remote(_)));
        assert!(service.ferragens().is_empty());
    }

    #[tokio::test]
    async fn test_add_ferragem_empty_tipo_rejected_before_network() {
        let mut mock = mock_com_snapshot(Vec::new(), Vec::new(), Vec::new());
        mock.expect_create_ferragem().never();

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .add_ferragem(NovaFerragem {
                tipo: "  ".to_string(),
                marca: "Stam".to_string(),
                quantidade: 15,
                categoria: "Ferragens".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::InvariantViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_add_projeto_derives_materials_from_history() {
        let dobradica = ferragem("1", "Dobradiça", "Hafele", 20);
        let movimentacoes = vec![
            retirada("1", dobradica.clone(), 4, "João Silva"),
            retirada("2", dobradica.clone(), 2, "João Silva"),
        ];
        let mut mock = mock_com_snapshot(vec![dobradica], movimentacoes, Vec::new());
        mock.expect_create_projeto()
            .times(1)
            .returning(|novo| {
                let agora = Utc::now();
                Ok(Projeto {
                    id: "3".to_string(),
                    nome_cliente: novo.nome_cliente,
                    marceneiro_responsavel: novo.marceneiro_responsavel,
                    status: novo.status,
                    valor: novo.valor,
                    materiais_usados: Vec::new(),
                    criado_em: agora,
                    atualizado_em: agora,
                })
            });

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let criado = service
            .add_projeto(NovoProjeto {
                nome_cliente: "João Silva".to_string(),
                marceneiro_responsavel: "Carlos Santos".to_string(),
                status: StatusProjeto::EmAndamento,
                valor: 2500.0,
            })
            .await
            .unwrap();

        assert_eq!(criado.materiais_usados.len(), 1);
        assert_eq!(criado.materiais_usados[0].quantidade, 6);
        assert_eq!(service.projetos().len(), 1);
    }

    #[tokio::test]
    async fn test_update_projeto_refreshes_timestamp() {
        let mock = mock_com_snapshot(Vec::new(), Vec::new(), vec![projeto("1", "João Silva")]);

        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();
        let antes = service.projetos()[0].atualizado_em;

        let editado = service
            .update_projeto(
                "1",
                AtualizaProjeto {
                    status: Some(StatusProjeto::Finalizado),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(editado.status, StatusProjeto::Finalizado);
        assert!(editado.atualizado_em >= antes);
    }

    #[tokio::test]
    async fn test_update_projeto_unknown_id_is_not_found() {
        let mock = mock_com_snapshot(Vec::new(), Vec::new(), Vec::new());
        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        let err = service
            .update_projeto("99", AtualizaProjeto::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_projeto_and_ferragem_locally() {
        let mock = mock_com_snapshot(
            vec![ferragem("1", "Dobradiça", "Hafele", 2)],
            Vec::new(),
            vec![projeto("1", "João Silva")],
        );
        let mut service = InventoryService::new(Arc::new(mock));
        service.load_all().await.unwrap();

        service.delete_projeto("1").unwrap();
        service.delete_ferragem("1").unwrap();
        assert!(service.projetos().is_empty());
        assert!(service.ferragens().is_empty());

        assert!(matches!(
            service.delete_ferragem("1").unwrap_err(),
            AppError::NotFound
        ));
    }
}
